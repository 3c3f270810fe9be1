//! Performance benchmarks for card encoding and export.
//!
//! - Encoding each tier for a sparse and a fully populated profile
//! - Folding long lines with multi-byte characters
//! - A full export into a temporary directory

use contact_export::analytics::SessionContext;
use contact_export::client::{AsyncCardApi, AsyncCardApiImpl, CardApiClient};
use contact_export::delivery::{DirectoryPlatform, Platform};
use contact_export::models::Address;
use contact_export::vcard::{encode, fold_line, Photo, Tier, VCardData};
use contact_export::{Config, ExportService, ExportServiceImpl, Metrics, Profile};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

fn sparse_profile() -> Profile {
    let mut profile = Profile::default();
    profile.id = Some("bench".to_string());
    profile.personal_info.first_name = "Ada".to_string();
    profile.personal_info.last_name = "Lovelace".to_string();
    profile.contact_info.email = Some("ada@example.com".to_string());
    profile
}

fn full_profile() -> Profile {
    let mut profile = sparse_profile();
    profile.personal_info.title = Some("Analyst, Engines; Notes".to_string());
    profile.personal_info.company = Some("Analytical Engines Ltd".to_string());
    profile.personal_info.bio = Some("Poetical science.\nFirst published algorithm. ".repeat(20));
    profile.contact_info.phone = Some("+44 20 7946 0000".to_string());
    profile.contact_info.whatsapp = Some("+44 20 7946 0000".to_string());
    profile.contact_info.website = Some("https://ada.example".to_string());
    profile.contact_info.address = Some(Address {
        street: Some("12 St James's Square".to_string()),
        city: Some("London".to_string()),
        country: Some("United Kingdom".to_string()),
        postal_code: Some("SW1Y 4JH".to_string()),
        ..Default::default()
    });
    for platform in ["linkedin", "github", "twitter", "instagram"] {
        profile.social_links.platforms.insert(
            platform.to_string(),
            Some(format!("https://{}.example/ada", platform)),
        );
    }
    profile
}

fn bench_encode_tiers(c: &mut Criterion) {
    let photo = Photo {
        mime_type: Some("image/jpeg".to_string()),
        bytes: vec![0xAB; 32 * 1024],
    };
    let cases = [
        ("sparse", VCardData::from_profile(&sparse_profile(), None, None)),
        (
            "full",
            VCardData::from_profile(
                &full_profile(),
                Some("https://cards.example/p/bench"),
                Some(photo),
            ),
        ),
    ];

    let mut group = c.benchmark_group("encode");
    for (name, data) in &cases {
        for tier in [Tier::Minimal, Tier::Simple, Tier::Full] {
            group.bench_with_input(
                BenchmarkId::new(*name, tier),
                &tier,
                |b, &tier| b.iter(|| encode(black_box(data), tier)),
            );
        }
    }
    group.finish();
}

fn bench_fold_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_line");
    for chars in [80usize, 1_000, 40_000] {
        let line = format!("NOTE:{}", "añb€".repeat(chars / 4));
        group.bench_with_input(BenchmarkId::from_parameter(chars), &line, |b, line| {
            b.iter(|| fold_line(black_box(line)))
        });
    }
    group.finish();
}

/// Export through the directory runtime; the backend is never reached.
fn bench_export_to_directory(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        revoke_delay_ms: 0,
        ..Default::default()
    };
    let metrics = Metrics::new();
    let api = Arc::new(AsyncCardApiImpl::new(CardApiClient::new(
        &config,
        metrics.clone(),
    ))) as Arc<dyn AsyncCardApi>;
    let platform = Arc::new(DirectoryPlatform::new(dir.path())) as Arc<dyn Platform>;
    let service = ExportServiceImpl::new(&config, platform, api, SessionContext::new(), metrics);
    let mut profile = full_profile();
    profile.id = None;

    c.bench_function("export_full_to_directory", |b| {
        b.to_async(&rt)
            .iter(|| async { service.export_contact(&profile, Tier::Full).await.unwrap() });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(50);
    targets = bench_encode_tiers,
        bench_fold_line,
        bench_export_to_directory
}

criterion_main!(benches);
