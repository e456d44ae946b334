//! File discovery over a realistic directory of lists

use dsv7::file_discovery::FileDiscovery;

use crate::common::test_helpers::*;

#[test]
fn test_discovers_all_lists() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let files = FileDiscovery::new().discover_files(temp_dir.path()).unwrap();

    assert_eq!(files.len(), 5);
    assert!(file_named(&files, "2024-05-03-Adorf-Vrl.dsv7").is_some());
    assert!(file_named(&files, "readme.txt").is_none());
}

#[test]
fn test_discover_all_keeps_root_order() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let roots = vec![
        temp_dir.path().join("verein"),
        temp_dir.path().join("2024-05-01-Duisburg-Wk.DSV7"),
    ];

    let files = FileDiscovery::new().discover_all(&roots).unwrap();
    assert_eq!(files.len(), 2);
    assert!(files[0].ends_with("verein/2024-05-02-Adorf-Meldung.DSV7"));
    assert!(files[1].ends_with("2024-05-01-Duisburg-Wk.DSV7"));
}

#[test]
fn test_exclude_broken_directory() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let files = FileDiscovery::new()
        .with_exclude_patterns(vec!["**/kaputt/**".to_string()])
        .unwrap()
        .discover_files(temp_dir.path())
        .unwrap();

    assert_eq!(files.len(), 4);
    assert!(file_named(&files, "2024-05-04-Adorf-Meldung.DSV7").is_none());
}

#[test]
fn test_depth_zero_only_reads_root() {
    let temp_dir = create_temp_dsv7_files().unwrap();
    let files = FileDiscovery::new()
        .with_max_depth(Some(0))
        .discover_files(temp_dir.path())
        .unwrap();

    assert_eq!(files.len(), 1);
}
