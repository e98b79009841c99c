use patternquery_core::{InMemoryPatternCallRepository, PatternCall, PatternCallRepository, RepoError};

#[test]
fn add_and_retrieve_by_every_index() {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(
        1,
        "TestPattern",
        "src/patterns/TestPattern.pat",
        true,
    ));

    let by_id = repo.get_pattern_call_by_id(1).unwrap();
    assert_eq!(by_id.name(), "TestPattern");

    let by_name = repo.get_pattern_calls_by_name("TestPattern");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].pattern_file(), "src/patterns/TestPattern.pat");

    let by_path = repo.get_pattern_calls_by_path("src/patterns/TestPattern.pat");
    assert_eq!(by_path.len(), 1);
    assert_eq!(by_path[0].name(), "TestPattern");
}

#[test]
fn first_record_wins_for_duplicate_id() {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(
        42,
        "myPattern",
        "src/patterns/Functional.pat",
        false,
    ));
    repo.add_pattern_call(PatternCall::new(42, "dup", "x", true));

    assert_eq!(repo.get_pattern_calls().len(), 1);
    assert_eq!(repo.get_pattern_call_by_id(42).unwrap().name(), "myPattern");
    assert!(repo.get_pattern_calls_by_name("dup").is_empty());
    assert!(repo.get_pattern_calls_by_path("x").is_empty());
}

#[test]
fn list_length_counts_distinct_ids_only() {
    let mut repo = InMemoryPatternCallRepository::new();
    let ids = [5, 3, 5, 9, 3, 3, 1];
    for (n, id) in ids.iter().enumerate() {
        repo.add_pattern_call(PatternCall::new(*id, format!("n{n}"), "p", n % 2 == 0));
    }

    let listed: Vec<i32> = repo.get_pattern_calls().iter().map(|c| c.id()).collect();
    assert_eq!(listed, vec![5, 3, 9, 1]);
    assert!(repo.len() <= ids.len());
    assert_eq!(repo.get_pattern_call_by_id(3).unwrap().name(), "n1");
}

#[test]
fn groups_preserve_insertion_order() {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(2, "CommonPattern", "src/patterns/Path2.pat", false));
    repo.add_pattern_call(PatternCall::new(1, "CommonPattern", "src/patterns/Path1.pat", true));
    repo.add_pattern_call(PatternCall::new(3, "Other", "src/patterns/Path1.pat", true));

    let by_name: Vec<i32> = repo
        .get_pattern_calls_by_name("CommonPattern")
        .iter()
        .map(|c| c.id())
        .collect();
    assert_eq!(by_name, vec![2, 1]);

    let by_path: Vec<i32> = repo
        .get_pattern_calls_by_path("src/patterns/Path1.pat")
        .iter()
        .map(|c| c.id())
        .collect();
    assert_eq!(by_path, vec![1, 3]);
}

#[test]
fn empty_repository_returns_none_and_empty_groups() {
    let repo = InMemoryPatternCallRepository::new();

    assert!(repo.is_empty());
    assert!(repo.get_pattern_call_by_id(1).is_none());
    assert!(repo.get_pattern_calls_by_name("NonExistentPattern").is_empty());
    assert!(repo
        .get_pattern_calls_by_path("src/patterns/NonExistent.pat")
        .is_empty());
}

#[test]
fn lookups_are_case_sensitive() {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(
        1,
        "PatternCase",
        "src/patterns/CaseSensitive.pat",
        true,
    ));

    assert!(repo.get_pattern_calls_by_name("patterncase").is_empty());
    assert!(repo
        .get_pattern_calls_by_path("src/PATTERNS/CASESENSITIVE.PAT")
        .is_empty());
}

#[test]
fn special_characters_and_empty_keys_are_indexed() {
    let mut repo = InMemoryPatternCallRepository::new();
    repo.add_pattern_call(PatternCall::new(1, "Pattern@Name#", "src/patterns/Pattern#1.pat", true));
    repo.add_pattern_call(PatternCall::new(2, "", "", false));

    let by_name = repo.get_pattern_calls_by_name("Pattern@Name#");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].pattern_file(), "src/patterns/Pattern#1.pat");
    assert_eq!(repo.get_pattern_calls_by_name("")[0].id(), 2);
    assert_eq!(repo.get_pattern_calls_by_path("")[0].id(), 2);
}

#[test]
fn missing_record_is_an_invalid_argument() {
    let mut repo = InMemoryPatternCallRepository::new();

    let err = repo.try_add_pattern_call(None).unwrap_err();
    assert!(matches!(err, RepoError::InvalidArgument(_)));
    assert!(repo.is_empty());

    repo.try_add_pattern_call(Some(PatternCall::new(7, "a", "p", true)))
        .unwrap();
    repo.try_add_pattern_call(Some(PatternCall::new(7, "b", "q", false)))
        .expect("duplicate ids are not errors");
    assert_eq!(repo.len(), 1);
    assert!(repo.contains_id(7));
}
