use jsearch_scraper::models::{DatePosted, SearchParameters, ValidationError};
use jsearch_scraper::presets::{find_preset, PRESETS};

#[test]
fn test_full_builder_wire_params() {
    let params = SearchParameters::builder("data engineer", "GB")
        .page(2)
        .num_pages(3)
        .date_posted("3days")
        .work_from_home(true)
        .employment_types("FULLTIME,CONTRACTOR")
        .radius(50)
        .language("")
        .build()
        .unwrap();

    let wire = params.to_api_params();
    let get = |key: &str| {
        wire.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(get("query"), Some("data engineer"));
    assert_eq!(get("country"), Some("gb"));
    assert_eq!(get("page"), Some("2"));
    assert_eq!(get("num_pages"), Some("3"));
    assert_eq!(get("date_posted"), Some("3days"));
    assert_eq!(get("work_from_home"), Some("true"));
    assert_eq!(get("employment_types"), Some("FULLTIME,CONTRACTOR"));
    assert_eq!(get("radius"), Some("50"));
    assert_eq!(get("language"), None);
}

#[test]
fn test_rejections() {
    assert_eq!(
        SearchParameters::new("   ", "us").unwrap_err(),
        ValidationError::EmptyQuery
    );
    assert!(matches!(
        SearchParameters::new("rust", "u1"),
        Err(ValidationError::InvalidCountry(_))
    ));
    assert_eq!(
        SearchParameters::builder("rust", "us").page(0).build().unwrap_err(),
        ValidationError::InvalidPage(0)
    );
    assert!(matches!(
        SearchParameters::builder("rust", "us").date_posted("yesterday").build(),
        Err(ValidationError::InvalidDatePosted(_))
    ));
}

#[test]
fn test_date_posted_round_trip_names() {
    for name in ["all", "today", "3days", "week", "month"] {
        let parsed: DatePosted = name.parse().unwrap();
        assert_eq!(parsed.as_str(), name);
    }
}

#[test]
fn test_presets_build_fulltime_searches() {
    assert_eq!(PRESETS.len(), 9);
    let remote = find_preset("senior-remote-us").unwrap().to_parameters().unwrap();
    assert!(remote.work_from_home());
    assert_eq!(remote.employment_types(), Some("FULLTIME"));
    assert_eq!(remote.date_posted(), DatePosted::Week);
}
