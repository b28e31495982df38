use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use family_tree_layout::config::Config;
use family_tree_layout::ir::{Gender, PersonRecord};
use family_tree_layout::layout::compute_layout;
use std::hint::black_box;

/// `generations` rows of couples; every couple has `children` kids who marry
/// into the next row. Birth years advance 25 per generation with a small
/// per-person spread so bands collide.
fn synthetic_family(generations: usize, children: usize) -> Vec<PersonRecord> {
    let mut records = Vec::new();
    let mut couples: Vec<(String, String)> = vec![("0-a".to_string(), "0-b".to_string())];
    records.push(person("0-a", Gender::Male, 1800, None));
    records.push(person("0-b", Gender::Female, 1801, None));

    for generation in 1..generations {
        let mut next = Vec::new();
        for (couple_idx, (father, mother)) in couples.iter().enumerate() {
            for child in 0..children {
                let id = format!("{generation}-{couple_idx}-{child}");
                let spouse = format!("{id}-s");
                let year = 1800 + generation as i32 * 25 + child as i32;
                let gender = if child % 2 == 0 { Gender::Male } else { Gender::Female };
                records.push(person(&id, gender, year, Some((father, mother))));
                records.push(person(&spouse, Gender::Other, year + 1, None));
                next.push((id, spouse));
            }
        }
        couples = next;
    }
    records
}

fn person(id: &str, gender: Gender, year: i32, parents: Option<(&String, &String)>) -> PersonRecord {
    let record = PersonRecord::new(id, id)
        .with_gender(gender)
        .with_dob(&format!("{year}-01-01"));
    match parents {
        Some((p1, p2)) => record.with_parents(Some(p1.as_str()), Some(p2.as_str())),
        None => record,
    }
}

fn bench_layout(c: &mut Criterion) {
    let config = Config::default();
    let mut group = c.benchmark_group("compute_layout");
    for (generations, children) in [(3, 2), (4, 3), (5, 3)] {
        let records = synthetic_family(generations, children);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", generations, records.len())),
            &records,
            |b, records| b.iter(|| compute_layout(black_box(records), black_box(&config))),
        );
    }
    group.finish();
}

fn bench_undated(c: &mut Criterion) {
    let config = Config::default();
    let mut records = synthetic_family(4, 3);
    for record in &mut records {
        record.dob = None;
    }
    c.bench_function("compute_layout/undated", |b| {
        b.iter(|| compute_layout(black_box(&records), black_box(&config)))
    });
}

criterion_group!(benches, bench_layout, bench_undated);
criterion_main!(benches);
