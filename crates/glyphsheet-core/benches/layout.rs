use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glyphsheet_core::{AtlasMetadata, CharacterSet, GridLayout};

fn bench_layout(c: &mut Criterion) {
    let charset = CharacterSet::default();
    c.bench_function("layout_default_charset", |b| {
        b.iter(|| GridLayout::new(black_box(&charset), 10, 16))
    });

    // About 12k scalars from the start of the BMP.
    let wide: String = ('\u{20}'..='\u{2fff}').collect();
    let wide = CharacterSet::new(&wide).unwrap();
    c.bench_function("layout_large_charset", |b| {
        b.iter(|| GridLayout::new(black_box(&wide), 64, 16))
    });

    let layout = GridLayout::new(&wide, 64, 16).unwrap();
    c.bench_function("sidecar_json_large", |b| {
        b.iter(|| {
            AtlasMetadata::from_layout("DejaVuSans", 12, black_box(&layout))
                .to_json()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
