use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use damgard_jurik::keypair::KeyGenParams;
use damgard_jurik::scheme::{DamgardJurik, Plaintext};
use num_bigint::BigUint;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn keyed_scheme(modulus_length: u64) -> DamgardJurik<StdRng> {
    let mut scheme = DamgardJurik::new(StdRng::seed_from_u64(12345));
    let params = KeyGenParams::try_with(modulus_length, 40).expect("build key params");
    let (public_key, private_key) = scheme.generate_key(Some(&params)).expect("generate key");
    scheme
        .set_key(public_key, Some(private_key))
        .expect("bind key");
    scheme
}

fn bench_happy_flow(c: &mut Criterion) {
    // 1) one-time setup
    let mut scheme = keyed_scheme(512);
    let original_data = "Heh safasdkjfhkjas fha sdf asda";
    let plaintext = scheme.generate_plaintext(original_data.as_bytes());

    c.bench_function("happy_flow", |b| {
        b.iter(|| {
            // 2) encrypt
            let cipher = scheme.encrypt(&plaintext).expect("encrypt");

            // 3) decrypt
            let decoded = scheme.decrypt(&cipher).expect("decrypt");

            // 4) black_box the result so the optimizer can't drop it
            black_box(scheme.generate_bytes_from_plaintext(&decoded));
        })
    });
}

fn bench_length_parameter(c: &mut Criterion) {
    let mut scheme = keyed_scheme(512);
    let mut group = c.benchmark_group("decrypt_by_s");

    for s in 1..=4u32 {
        scheme.set_length_parameter(s).expect("set s");
        let n_s = scheme.public_key().expect("public key").modulus_power(s);
        let cipher = scheme
            .encrypt(&Plaintext::new(n_s - BigUint::from(1u32)))
            .expect("encrypt");

        group.bench_with_input(BenchmarkId::from_parameter(s), &cipher, |b, cipher| {
            b.iter(|| black_box(scheme.decrypt(cipher).expect("decrypt")))
        });
    }

    group.finish();
}

fn bench_homomorphic_add(c: &mut Criterion) {
    let mut scheme = keyed_scheme(512);
    let c1 = scheme.encrypt(&Plaintext::from(20u64)).expect("encrypt");
    let c2 = scheme.encrypt(&Plaintext::from(22u64)).expect("encrypt");

    c.bench_function("homomorphic_add", |b| {
        b.iter(|| black_box(scheme.add(&c1, &c2).expect("add")))
    });
}

criterion_group!(
    benches,
    bench_happy_flow,
    bench_length_parameter,
    bench_homomorphic_add
);
criterion_main!(benches);
