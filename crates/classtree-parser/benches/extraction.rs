use classtree_core::hierarchy::Forest;
use classtree_parser::{Extractor, Language};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::path::PathBuf;

const SAMPLE_CSHARP: &str = r#"
using System;
using System.Collections.Generic;

namespace Inventory.Domain
{
    public abstract class Entity
    {
        public Guid Id { get; protected set; }
        public abstract void Validate();
        public override string ToString() { return Id.ToString(); }
    }

    public sealed class Product : Entity, IComparable<Product>
    {
        public string Name { get; set; }
        public decimal Price { get; set; }

        public Product(string name, decimal price)
        {
            Name = name;
            Price = price;
        }

        public override void Validate()
        {
            if (string.IsNullOrEmpty(Name)) { throw new InvalidOperationException("name"); }
            foreach (var c in Name) { }
        }

        public int CompareTo(Product other) { return Price.CompareTo(other.Price); }

        private class PriceCache
        {
            private readonly Dictionary<Guid, decimal> cache = new();
            public bool TryGet(Guid id, out decimal price) { return cache.TryGetValue(id, out price); }
        }
    }

    public static class ProductExtensions
    {
        public static bool IsFree(this Product p) { return p.Price == 0; }
    }
}
"#;

const SAMPLE_PYTHON: &str = r#"
from abc import ABC, abstractmethod


class Repository(ABC):
    @abstractmethod
    def get(self, key):
        ...

    @abstractmethod
    def put(self, key, value):
        ...


class MemoryRepository(Repository):
    class Entry:
        def __init__(self, value):
            self.value = value

    def __init__(self):
        self.items = {}

    def get(self, key):
        return self.items.get(key)

    def put(self, key, value):
        self.items[key] = MemoryRepository.Entry(value)
"#;

fn bench_csharp_extraction(c: &mut Criterion) {
    let extractor = Extractor::for_language(Language::CSharp);
    let path = PathBuf::from("Product.cs");
    c.bench_function("extract_classes_csharp", |b| {
        b.iter(|| extractor.extract_source(black_box(&path), black_box(SAMPLE_CSHARP)))
    });
}

fn bench_python_extraction(c: &mut Criterion) {
    let extractor = Extractor::for_language(Language::Python);
    let path = PathBuf::from("repository.py");
    c.bench_function("extract_classes_python", |b| {
        b.iter(|| extractor.extract_source(black_box(&path), black_box(SAMPLE_PYTHON)))
    });
}

fn bench_forest_build(c: &mut Criterion) {
    let extractor = Extractor::for_language(Language::CSharp);
    let entities: Vec<_> = (0..50)
        .flat_map(|i| extractor.extract_source(&PathBuf::from(format!("File{i}.cs")), SAMPLE_CSHARP))
        .collect();

    c.bench_function("build_forest_50_files", |b| {
        b.iter(|| Forest::build(black_box(entities.clone())))
    });
}

criterion_group!(
    benches,
    bench_csharp_extraction,
    bench_python_extraction,
    bench_forest_build,
);
criterion_main!(benches);
