use folio_wasm::gallery::{FilterQuery, Gallery, GalleryError, ProjectRecord};

fn record(id: &str, title: &str, category: &str, year: u16, tech: &[&str], featured: bool) -> ProjectRecord {
    ProjectRecord {
        id: id.into(),
        title: title.into(),
        description: format!("{title} in brief"),
        long_description: format!("{title} at length"),
        category: category.into(),
        year,
        tech: tech.iter().map(|t| t.to_string()).collect(),
        image: None,
        demo: None,
        github: None,
        is_featured: featured,
    }
}

fn sample() -> Gallery {
    Gallery::new(vec![
        record("a", "Atlas", "Web", 2023, &["React", "Node.js"], true),
        record("b", "Beacon", "Web", 2024, &["Svelte"], false),
        record("c", "Cinder", "Graphics", 2023, &["Rust", "wgpu"], true),
        record("d", "Dune", "Graphics", 2022, &["WebGL"], false),
        record("e", "Echo", "Audio", 2023, &["Web Audio"], false),
        record("f", "Fathom", "Web", 2023, &["React"], false),
        record("g", "Gale", "Tools", 2021, &["Rust"], false),
    ])
}

fn ids(records: &[&ProjectRecord]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn featured_uses_flagged_records() {
    let gallery = sample();
    assert_eq!(ids(&gallery.featured()), vec!["a", "c"]);
}

#[test]
fn featured_falls_back_to_first_five() {
    let projects: Vec<ProjectRecord> = sample()
        .records()
        .iter()
        .cloned()
        .map(|mut r| {
            r.is_featured = false;
            r
        })
        .collect();
    let gallery = Gallery::new(projects);
    assert_eq!(ids(&gallery.featured()), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn featured_fallback_handles_short_lists() {
    let gallery = Gallery::new(vec![
        record("a", "Atlas", "Web", 2023, &[], false),
        record("b", "Beacon", "Web", 2024, &[], false),
    ]);
    assert_eq!(gallery.featured().len(), 2);
}

#[test]
fn filtering_in_stages_equals_filtering_at_once() {
    let gallery = sample();
    let both = FilterQuery {
        search: String::new(),
        category: Some("Web".into()),
        year: Some(2023),
    };
    let by_category = FilterQuery {
        search: String::new(),
        category: Some("Web".into()),
        year: None,
    };
    let by_year = FilterQuery {
        search: String::new(),
        category: None,
        year: Some(2023),
    };

    let at_once = ids(&gallery.filter(&both));
    let category_ids = ids(&gallery.filter(&by_category));
    let year_ids = ids(&gallery.filter(&by_year));
    let staged: Vec<String> = category_ids
        .into_iter()
        .filter(|id| year_ids.contains(id))
        .collect();

    assert_eq!(at_once, staged);
    assert_eq!(at_once, vec!["a", "f"]);
}

#[test]
fn search_is_case_insensitive_over_tech_tags() {
    let gallery = sample();
    let query = FilterQuery {
        search: "react".into(),
        category: None,
        year: None,
    };
    assert_eq!(ids(&gallery.filter(&query)), vec!["a", "f"]);

    // The same match holds with the other filters engaged.
    let narrowed = FilterQuery {
        search: "react".into(),
        category: Some("Web".into()),
        year: Some(2023),
    };
    assert_eq!(ids(&gallery.filter(&narrowed)), vec!["a", "f"]);
}

#[test]
fn search_matches_titles_too() {
    let gallery = sample();
    let query = FilterQuery {
        search: "fath".into(),
        ..Default::default()
    };
    assert_eq!(ids(&gallery.filter(&query)), vec!["f"]);
}

#[test]
fn empty_search_matches_everything() {
    let gallery = sample();
    assert_eq!(gallery.filter(&FilterQuery::default()).len(), 7);
}

#[test]
fn lookup_miss_returns_none() {
    let gallery = sample();
    assert!(gallery.find("a").is_some());
    assert!(gallery.find("never-published").is_none());
}

#[test]
fn lookup_hit_exposes_every_display_field() {
    let gallery = sample();
    let record = gallery.find("c").expect("record should exist");
    assert_eq!(record.title, "Cinder");
    assert_eq!(record.long_description, "Cinder at length");
    assert_eq!(record.category, "Graphics");
    assert_eq!(record.year, 2023);
    assert_eq!(record.tech, vec!["Rust", "wgpu"]);
}

#[test]
fn filter_options_are_distinct_and_ordered() {
    let gallery = sample();
    assert_eq!(gallery.categories(), vec!["Web", "Graphics", "Audio", "Tools"]);
    assert_eq!(gallery.years(), vec![2024, 2023, 2022, 2021]);
}

#[test]
fn parses_camel_case_payloads() {
    let payload = r#"[
        {
            "id": "atlas",
            "title": "Atlas",
            "description": "Route planner",
            "longDescription": "A longer story",
            "category": "Web",
            "year": 2024,
            "tech": ["React"],
            "demo": "https://example.dev",
            "isFeatured": true
        },
        {
            "title": "No Id Yet",
            "description": "Legacy record",
            "category": "Tools",
            "year": 2020
        }
    ]"#;
    let gallery = Gallery::from_json(payload).expect("payload should parse");
    let atlas = gallery.find("atlas").expect("explicit id");
    assert!(atlas.is_featured);
    assert_eq!(atlas.long_description, "A longer story");
    // Records without an id get one derived from the title.
    assert!(gallery.find("no-id-yet").is_some());
}

#[test]
fn malformed_payload_is_a_parse_error() {
    let err = Gallery::from_json("{\"not\": \"an array\"}").unwrap_err();
    assert!(matches!(err, GalleryError::Parse(_)));
}
