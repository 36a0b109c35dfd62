//! Tests for company directory loading

use forumscan::companies::load_companies;
use forumscan::config::DirectoryConfig;
use forumscan::error::Error;
use std::io::Write;
use std::path::Path;

const DIRECTORY: &str = r#"
# Spółki WIG20

| Spółka | Forum |
|--------|-------|
| [KGHM](https://www.bankier.pl/forum/forum_o_kghm,6,28,1.html) | miedź |
| [Orlen](https://www.bankier.pl/forum/forum_o_pkn-orlen,6,36,1.html) | paliwa |
| [Notowania KGHM](https://www.bankier.pl/inwestowanie/profile/quote.html?symbol=KGHM) | |
| [Inne forum](https://forum.example.com/kghm) | |
| [KGHM](https://www.bankier.pl/forum/forum_o_kghm,6,28,2.html) | nowy adres |
"#;

#[test]
fn test_load_companies_from_markdown() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DIRECTORY.as_bytes()).unwrap();

    let companies = load_companies(file.path(), &DirectoryConfig::default()).unwrap();

    let names: Vec<&str> = companies.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["KGHM", "Orlen"]);
    assert_eq!(
        companies[0].forum_url,
        "https://www.bankier.pl/forum/forum_o_kghm,6,28,2.html"
    );
}

#[test]
fn test_custom_markers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(DIRECTORY.as_bytes()).unwrap();

    let markers = DirectoryConfig {
        forum_marker: "forum".to_string(),
        site_marker: "example.com".to_string(),
    };
    let companies = load_companies(file.path(), &markers).unwrap();

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name, "Inne forum");
}

#[test]
fn test_missing_directory_file() {
    let err = load_companies(Path::new("no/such/companies.md"), &DirectoryConfig::default())
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
