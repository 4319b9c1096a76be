use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use globalpay_client_sdk::card_storage::{Amount, Card, CardStorageRequest, Operation};
use globalpay_client_sdk::clock::FixedClock;
use globalpay_client_sdk::signature::chained_signature;
use globalpay_client_sdk::{Client, ConfigOption};

fn bench_chained_signature(c: &mut Criterion) {
    let elements = [
        "20180614095601",
        "realexsandbox",
        "N6qsk4kYRZihmPrTXWYS6g",
        "1001",
        "EUR",
        "03e28f0e-492e-80bd-20ec318e9334",
    ];

    c.bench_function("chained_signature", |b| {
        b.iter(|| chained_signature(black_box(&elements), black_box("Po8lRRT67a")));
    });
}

fn bench_sign_request(c: &mut Criterion) {
    let client = Client::new([ConfigOption::clock(FixedClock::from_formatted(
        "20180614095601",
    ))])
    .expect("valid config");
    let request = CardStorageRequest {
        order_id: "N6qsk4kYRZihmPrTXWYS6g".to_owned(),
        payer_ref: "03e28f0e-492e-80bd-20ec318e9334".to_owned(),
        amount: Some(Amount::new("1001", "EUR")),
        card: Some(Card {
            number: Some("4263970000005262".to_owned()),
            holder_name: Some("James Mason".to_owned()),
            ..Card::default()
        }),
        ..CardStorageRequest::default()
    };
    let card_storage = client.card_storage();

    let mut group = c.benchmark_group("card_storage");
    group.bench_function("sign_store_card", |b| {
        b.iter(|| {
            card_storage
                .sign(Operation::StoreCard, black_box(&request))
                .signature()
                .len()
        });
    });
    group.bench_function("sign_and_encode_store_card", |b| {
        b.iter(|| {
            card_storage
                .sign(Operation::StoreCard, black_box(&request))
                .to_xml()
                .expect("encodes")
        });
    });
    group.finish();
}

criterion_group!(benches, bench_chained_signature, bench_sign_request);
criterion_main!(benches);
