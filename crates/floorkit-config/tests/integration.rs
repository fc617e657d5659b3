use floorkit_config::{
    ConfigPatch, ConfigStore, JsonFileStore, KvStore, RangeFields, RetrySettings, STORAGE_KEY,
};

#[test]
fn merged_settings_survive_a_restart() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("local_storage.json");

    {
        let mut config = ConfigStore::open(JsonFileStore::new(&path));
        config.save(ConfigPatch::hide(RangeFields::new(2, 4)))?;
        config.save(ConfigPatch::unhide(RangeFields::new(5, 6)))?;
        config.save(ConfigPatch::retry(RetrySettings {
            interval_ms: 100,
            max_retries: 3,
            init_delay_ms: 0,
        }))?;
    }

    let restarted = ConfigStore::open(JsonFileStore::new(&path));
    let current = restarted.current();
    assert_eq!(current.hide, RangeFields::new(2, 4));
    assert_eq!(current.unhide, RangeFields::new(5, 6));
    assert_eq!(current.retry.interval_ms, 100);
    assert_eq!(current.retry.max_retries, 3);
    Ok(())
}

#[test]
fn hand_edited_blob_is_read_leniently() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("local_storage.json"));
    store.set(
        STORAGE_KEY,
        r#"{"hideStart":"1","hideEnd":"x","maxRetries":"-3","theme":"dark"}"#,
    )?;

    let config = ConfigStore::open(store);
    let current = config.current();
    assert_eq!(current.hide.start, Some(1));
    assert_eq!(current.hide.end, None);
    assert_eq!(current.retry, RetrySettings::default());
    Ok(())
}

#[test]
fn numeric_values_keep_the_rest_of_the_record() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("local_storage.json");
    JsonFileStore::new(&path).set(
        STORAGE_KEY,
        r#"{"hideStart":"2","hideEnd":"4","maxRetries":5,"initDelay":false,"theme":"dark"}"#,
    )?;

    let mut config = ConfigStore::open(JsonFileStore::new(&path));
    assert_eq!(config.current().hide, RangeFields::new(2, 4));
    assert_eq!(config.current().retry.max_retries, 5);
    assert_eq!(config.current().retry.init_delay_ms, 0);

    config.save(ConfigPatch::floor(1, "kept"))?;
    let raw = JsonFileStore::new(&path).get(STORAGE_KEY)?.unwrap_or_default();
    let saved: serde_json::Value = serde_json::from_str(&raw)?;
    assert_eq!(saved["theme"], "dark");
    assert_eq!(saved["hideEnd"], "4");
    assert_eq!(saved["maxRetries"], "5");
    Ok(())
}
