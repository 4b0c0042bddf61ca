use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use phonebook::field::{FieldEvent, PhoneInput};
use phonebook::mask::{format_display, EditKey};

fn bench_reformat(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask_reformat");
    group.bench_function("format_display_full_number", |b| {
        b.iter(|| format_display(black_box("+7 (999) 123-45-67")))
    });
    group.bench_function("format_display_noisy_paste", |b| {
        b.iter(|| format_display(black_box("тел.: 8 (999) 123-45-67, доб. 1234")))
    });
    group.finish();
}

fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("phone_input");
    group.bench_function("type_ten_digits", |b| {
        b.iter_batched(
            || {
                let mut input = PhoneInput::new();
                input.handle(FieldEvent::Focus);
                input
            },
            |mut input| {
                for ch in "9991234567".chars() {
                    input.handle(FieldEvent::Key(EditKey::Char(ch)));
                }
                input
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_reformat, bench_typing);
criterion_main!(benches);
