// tests/env_merge.rs

use std::collections::BTreeMap;
use std::path::Path;

use proptest::prelude::*;

use scholarship_daily::env::Environment;
use scholarship_daily::fs::mock::MockFileSystem;

fn vars_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    proptest::collection::btree_map("[A-Z][A-Z0-9_]{0,8}", "[a-z0-9]{1,12}", 0..8)
}

fn render_env_file(vars: &BTreeMap<String, String>) -> String {
    vars.iter().map(|(k, v)| format!("{k}={v}\n")).collect()
}

proptest! {
    #[test]
    fn process_values_win_unless_override(
        process in vars_strategy(),
        file in vars_strategy(),
        override_existing in any::<bool>(),
    ) {
        let fs = MockFileSystem::new().with_file(".env", render_env_file(&file));
        let mut env = Environment::from_pairs(process.clone());

        let applied = env.merge_file(&fs, Path::new(".env"), override_existing).unwrap();

        for (key, value) in &file {
            let expected = match process.get(key) {
                Some(existing) if !override_existing => existing,
                _ => value,
            };
            prop_assert_eq!(env.get(key), Some(expected.as_str()));
        }
        for (key, value) in &process {
            if !file.contains_key(key) {
                prop_assert_eq!(env.get(key), Some(value.as_str()));
            }
        }

        let expected_applied = file
            .keys()
            .filter(|k| override_existing || !process.contains_key(*k))
            .count();
        prop_assert_eq!(applied, expected_applied);
    }
}
