//! History stays bounded, deduplicated and durable.

mod helpers;

use helpers::sample_resolver;
use mail_auth_check::{check_domain, FileStore, HistoryEntry, HistoryStore};
use tempfile::TempDir;

#[tokio::test]
async fn test_checks_recorded_most_recent_first() {
    let dir = TempDir::new().unwrap();
    let resolver = sample_resolver();
    let mut history = HistoryStore::open(FileStore::new(dir.path())).unwrap();

    for (i, domain) in ["secure.example", "dmarc-only.example", "https://secure.example/"]
        .iter()
        .enumerate()
    {
        let result = check_domain(&resolver, domain).await.unwrap();
        history
            .add(HistoryEntry::from_result(&result, i as i64))
            .unwrap();
    }

    let domains: Vec<&str> = history.entries().iter().map(|e| e.domain.as_str()).collect();
    assert_eq!(domains, vec!["secure.example", "dmarc-only.example"]);
    assert_eq!(history.entries()[0].timestamp, 2);
    assert_eq!(history.entries()[0].score, 100);
}

#[test]
fn test_eleven_domains_keep_ten_after_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut history = HistoryStore::open(FileStore::new(dir.path())).unwrap();
        for i in 0..11 {
            let entry: HistoryEntry = serde_json::from_value(serde_json::json!({
                "domain": format!("site{i}.example"),
                "timestamp": i,
                "dmarcStatus": "valid",
                "spfStatus": "invalid",
                "dkimStatus": "not_found",
                "score": 50,
            }))
            .unwrap();
            history.add(entry).unwrap();
        }
    }

    let history = HistoryStore::open(FileStore::new(dir.path())).unwrap();
    assert_eq!(history.len(), 10);
    assert_eq!(history.entries()[0].domain, "site10.example");
    assert_eq!(history.entries()[9].domain, "site1.example");
    assert!(history.get("site0.example").is_none());
}

#[test]
fn test_corrupt_file_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("dmarc_check_history.json"), "[{\"domain\":").unwrap();

    let history = HistoryStore::open(FileStore::new(dir.path())).unwrap();
    assert!(history.is_empty());
}
