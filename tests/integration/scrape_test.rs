// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{activity_page, reqwest_engine, source, StubEngine};
use deptpages::application::usecases::scrape_activities::ScrapeActivitiesUseCase;
use deptpages::domain::models::category::Category;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

fn table_lines(content: &str) -> Vec<&str> {
    content.lines().skip(2).collect()
}

#[tokio::test]
async fn test_scrape_writes_sorted_category_files() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/bil/egitim",
        200,
        activity_page(&[
            ("Yaz Okulu", Some("/haber/1"), "2020-2022"),
            ("Kariyer Günü", None, "Bahar dönemi"),
            ("Yapay Zeka Semineri", Some("https://example.com/seminer"), "15 Mart 2021"),
        ]),
    )
    .await;
    mount_page(
        &server,
        "/cev/egitim",
        200,
        activity_page(&[("Laboratuvar Gezisi", None, "01.06.2022")]),
    )
    .await;
    mount_page(&server, "/bil/ar-ge", 500, "Internal Server Error".to_string()).await;
    mount_page(
        &server,
        "/bil/saglik",
        200,
        "<html><body><p>Henüz faaliyet eklenmedi.</p></body></html>".to_string(),
    )
    .await;
    mount_page(
        &server,
        "/bil/sosyal-sorumluluk",
        200,
        activity_page(&[
            ("Fidan Dikimi", None, "2019"),
            ("Kan Bağışı", None, "2021-11-05"),
        ]),
    )
    .await;
    // Unknown hints are rejected before any request is issued.
    Mock::given(method("GET"))
        .and(path("/bil/bap-projeleri"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sources = vec![
        source(format!("{base}/bil/egitim"), "Fakültemiz Bilgisayar Mühendisliği bölümünde ", "egitim"),
        source(format!("{base}/bil/ar-ge"), "Fakültemiz Bilgisayar Mühendisliği bölümünde ", "ar-ge"),
        source(format!("{base}/bil/saglik"), "Fakültemiz Bilgisayar Mühendisliği bölümünde ", "saglik"),
        source(
            format!("{base}/bil/sosyal-sorumluluk"),
            "Fakültemiz Bilgisayar Mühendisliği bölümünde ",
            "sosyal-sorumluluk",
        ),
        source(format!("{base}/bil/bap-projeleri"), "Fakültemiz Bilgisayar Mühendisliği bölümünde ", "bap-projeleri"),
        source(format!("{base}/cev/egitim"), "Fakültemiz Çevre Mühendisliği bölümünde ", "egitim"),
    ];

    let output_dir = tempfile::tempdir().unwrap();
    let use_case = ScrapeActivitiesUseCase::new(reqwest_engine(), Duration::from_secs(15), 10);
    let mut out = Vec::new();
    let summary = use_case
        .run(&sources, output_dir.path(), &mut out)
        .await
        .unwrap();

    // Only categories with rows get a file.
    assert_eq!(summary.files.len(), 2);
    assert!(output_dir.path().join("education_activities.md").exists());
    assert!(output_dir.path().join("social_responsibility_activities.md").exists());
    assert!(!output_dir.path().join("research_activities.md").exists());
    assert!(!output_dir.path().join("health_activities.md").exists());

    // Row counts match the extracted rows per category.
    assert_eq!(summary.buckets.rows(Category::Education).len(), 4);
    assert_eq!(summary.buckets.rows(Category::Research).len(), 0);
    assert_eq!(summary.buckets.rows(Category::Health).len(), 0);
    assert_eq!(summary.buckets.rows(Category::SocialResponsibility).len(), 2);

    let education = fs::read_to_string(output_dir.path().join("education_activities.md")).unwrap();
    assert!(education.starts_with("| Activity | Date |\n|----------|------|\n"));
    assert_eq!(
        table_lines(&education),
        vec![
            "| Fakültemiz Çevre Mühendisliği bölümünde Laboratuvar Gezisi | 01.06.2022 |".to_string(),
            format!("| [Fakültemiz Bilgisayar Mühendisliği bölümünde Yaz Okulu]({base}/haber/1) | 01.01.2022 |"),
            "| [Fakültemiz Bilgisayar Mühendisliği bölümünde Yapay Zeka Semineri](https://example.com/seminer) | 15.03.2021 |".to_string(),
            "| Fakültemiz Bilgisayar Mühendisliği bölümünde Kariyer Günü | Bahar dönemi |".to_string(),
        ]
    );

    let social =
        fs::read_to_string(output_dir.path().join("social_responsibility_activities.md")).unwrap();
    assert_eq!(
        table_lines(&social),
        vec![
            "| Fakültemiz Bilgisayar Mühendisliği bölümünde Kan Bağışı | 05.11.2021 |",
            "| Fakültemiz Bilgisayar Mühendisliği bölümünde Fidan Dikimi | 01.01.2019 |",
        ]
    );

    // Failed pages are reported and the batch carries on.
    assert_eq!(summary.failures.len(), 3);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains(&format!("Failed to fetch URL {base}/bil/ar-ge: HTTP status 500")));
    assert!(output.contains(&format!("Failed to fetch URL {base}/bil/saglik: no table found")));
    assert!(output.contains(&format!(
        "Failed to fetch URL {base}/bil/bap-projeleri: unknown category hint 'bap-projeleri'"
    )));
    assert_eq!(output.matches("Markdown file saved: ").count(), 2);
}

#[tokio::test]
async fn test_unreachable_page_does_not_abort_batch() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/egitim",
        200,
        activity_page(&[("Seminer", None, "2021")]),
    )
    .await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let sources = vec![
        source(format!("http://{closed}/egitim"), "", "egitim"),
        source(format!("{}/egitim", server.uri()), "", "egitim"),
    ];

    let use_case = ScrapeActivitiesUseCase::new(reqwest_engine(), Duration::from_secs(5), 2);
    let (buckets, failures) = use_case.collect(&sources, &mut std::io::sink()).await.unwrap();

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].url, format!("http://{closed}/egitim"));
    assert_eq!(buckets.rows(Category::Education).len(), 1);
    assert_eq!(buckets.rows(Category::Education)[0].source_index, 1);
}

#[tokio::test]
async fn test_fetches_are_bounded_by_worker_count() {
    let mut engine = StubEngine::new(Duration::from_millis(50));
    let mut sources = Vec::new();
    for i in 0..12 {
        let url = format!("https://dept{i}.example/egitim");
        engine = engine.with_page(&url, 200, activity_page(&[("Etkinlik", None, "2021")]));
        sources.push(source(url, "", "egitim"));
    }
    let engine = Arc::new(engine);

    let use_case = ScrapeActivitiesUseCase::new(engine.clone(), Duration::from_secs(1), 3);
    let (buckets, failures) = use_case.collect(&sources, &mut std::io::sink()).await.unwrap();

    assert!(failures.is_empty());
    assert_eq!(engine.requests(), 12);
    assert!(engine.max_in_flight() <= 3);
    assert!(engine.max_in_flight() > 1);
    assert_eq!(buckets.total_rows(), 12);
}

#[tokio::test]
async fn test_same_input_gives_same_output_regardless_of_completion_order() {
    let mut engine = StubEngine::new(Duration::from_millis(5));
    let mut sources = Vec::new();
    for i in 0..6 {
        let url = format!("https://dept{i}.example/ar-ge");
        let title = format!("Proje {i}");
        engine = engine.with_page(
            &url,
            200,
            activity_page(&[(title.as_str(), None, "2021"), ("Tarihsiz", None, "")]),
        );
        sources.push(source(url, "", "ar-ge"));
    }
    let engine = Arc::new(engine);
    let use_case = ScrapeActivitiesUseCase::new(engine, Duration::from_secs(1), 6);

    let (mut buckets, _) = use_case.collect(&sources, &mut std::io::sink()).await.unwrap();
    buckets.sort_newest_first();

    let activities: Vec<String> = buckets
        .rows(Category::Research)
        .iter()
        .map(|r| r.activity.clone())
        .collect();
    assert_eq!(
        activities,
        vec![
            "Proje 0", "Proje 1", "Proje 2", "Proje 3", "Proje 4", "Proje 5", "Tarihsiz", "Tarihsiz",
            "Tarihsiz", "Tarihsiz", "Tarihsiz", "Tarihsiz",
        ]
    );
}

#[tokio::test]
async fn test_empty_category_keeps_previous_file() {
    let output_dir = tempfile::tempdir().unwrap();
    let previous = "| Activity | Date |\n|----------|------|\n| Old | 01.01.2020 |\n";
    fs::write(output_dir.path().join("health_activities.md"), previous).unwrap();

    let engine = StubEngine::new(Duration::from_millis(1))
        .with_page("https://dept.example/saglik", 503, String::new())
        .with_page(
            "https://dept.example/egitim",
            200,
            activity_page(&[("Seminer", None, "2021")]),
        );
    let sources = vec![
        source("https://dept.example/saglik", "", "saglik"),
        source("https://dept.example/oduller", "", "oduller"),
        source("https://dept.example/egitim", "", "egitim"),
    ];

    let use_case = ScrapeActivitiesUseCase::new(Arc::new(engine), Duration::from_secs(1), 2);
    let mut out = Vec::new();
    let summary = use_case
        .run(&sources, output_dir.path(), &mut out)
        .await
        .unwrap();

    assert_eq!(summary.files, vec![output_dir.path().join("education_activities.md")]);
    assert_eq!(
        fs::read_to_string(output_dir.path().join("health_activities.md")).unwrap(),
        previous
    );
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Failed to fetch URL https://dept.example/saglik: HTTP status 503"));
    assert!(output.contains("Failed to fetch URL https://dept.example/oduller: HTTP status 404"));
    assert!(!output.contains("health_activities.md"));
}

#[tokio::test]
async fn test_failures_are_reported_in_completion_order() {
    let engine = StubEngine::new(Duration::from_millis(1))
        .with_delayed_page(
            "https://slow.example/egitim",
            500,
            String::new(),
            Duration::from_millis(300),
        )
        .with_delayed_page(
            "https://fast.example/egitim",
            404,
            String::new(),
            Duration::from_millis(10),
        );
    let sources = vec![
        source("https://slow.example/egitim", "", "egitim"),
        source("https://fast.example/egitim", "", "egitim"),
    ];

    let use_case = ScrapeActivitiesUseCase::new(Arc::new(engine), Duration::from_secs(1), 2);
    let mut out = Vec::new();
    let (_, failures) = use_case.collect(&sources, &mut out).await.unwrap();

    assert_eq!(failures.len(), 2);
    assert_eq!(failures[0].url, "https://fast.example/egitim");
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Failed to fetch URL https://fast.example/egitim: HTTP status 404\n\
         Failed to fetch URL https://slow.example/egitim: HTTP status 500\n"
    );
}
