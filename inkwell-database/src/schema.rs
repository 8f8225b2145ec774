use std::collections::BTreeMap;

use anyhow::Context as _;
use serde_json::{Map, Value};
use tracing::info;

use crate::model::prompts::PromptDocument;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_KEY: &str = "schemaVersion";

struct Migration {
    version: u32,
    description: &'static str,
    apply: fn(&mut Map<String, Value>) -> anyhow::Result<()>,
}

/// Ordered migrations. A document at version `v` runs every entry above `v`.
/// Documents without a version field are treated as version 0.
const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    description: "key prompts by numeric id instead of `P<id>`",
    apply: strip_prompt_key_prefix,
}];

/// Root document as loaded from the store.
#[derive(Clone, Debug)]
pub struct LoadedDocument {
    pub document: PromptDocument,
    /// True when migrations rewrote the stored shape and it has not been saved yet.
    pub migrated: bool,
}

/// Document used when the store holds nothing yet.
pub fn empty_document() -> PromptDocument {
    PromptDocument {
        schema_version: CURRENT_SCHEMA_VERSION,
        prompts: BTreeMap::new(),
        next_id: 1,
        today_prompt: None,
    }
}

/// Turn the raw root value into a current-version document.
pub fn initialize_document(raw: Option<Value>) -> anyhow::Result<LoadedDocument> {
    let mut root = match raw {
        None | Some(Value::Null) => {
            return Ok(LoadedDocument {
                document: empty_document(),
                migrated: false,
            });
        }
        Some(Value::Object(root)) => root,
        Some(other) => anyhow::bail!("root document must be a JSON object, found {other}"),
    };

    let stored_version = match root.get(SCHEMA_VERSION_KEY) {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .and_then(|version| u32::try_from(version).ok())
            .context("schemaVersion is not a valid version number")?,
    };

    if stored_version > CURRENT_SCHEMA_VERSION {
        anyhow::bail!(
            "document schema version {stored_version} is newer than supported version {CURRENT_SCHEMA_VERSION}"
        );
    }

    let mut migrated = false;
    for migration in MIGRATIONS
        .iter()
        .filter(|migration| migration.version > stored_version)
    {
        info!(
            from = stored_version,
            to = migration.version,
            migration = migration.description,
            "migrating prompt document"
        );
        (migration.apply)(&mut root)
            .with_context(|| format!("migration to version {} failed", migration.version))?;
        root.insert(SCHEMA_VERSION_KEY.to_owned(), Value::from(migration.version));
        migrated = true;
    }

    let document = serde_json::from_value(Value::Object(root))
        .context("stored document does not match the prompt schema")?;

    Ok(LoadedDocument { document, migrated })
}

fn strip_prompt_key_prefix(root: &mut Map<String, Value>) -> anyhow::Result<()> {
    root.entry("nextId").or_insert(Value::from(1));

    let prompts = match root.remove("prompts") {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(prompts)) => prompts,
        Some(other) => anyhow::bail!("legacy prompts must be an object, found {other}"),
    };

    let mut rekeyed = Map::with_capacity(prompts.len());
    for (key, prompt) in prompts {
        // Removed prompts may linger as nulls.
        if prompt.is_null() {
            continue;
        }

        let id = key.strip_prefix('P').unwrap_or(&key);
        id.parse::<u64>()
            .with_context(|| format!("legacy prompt key `{key}` has no numeric id"))?;
        rekeyed.insert(id.to_owned(), prompt);
    }

    root.insert("prompts".to_owned(), Value::Object(rekeyed));
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{CURRENT_SCHEMA_VERSION, empty_document, initialize_document};

    #[test]
    fn missing_document_initializes_empty() {
        let loaded = initialize_document(None).unwrap();
        assert_eq!(loaded.document, empty_document());
        assert!(!loaded.migrated);
        assert_eq!(loaded.document.next_id, 1);
        assert_eq!(loaded.document.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn current_document_loads_unchanged() {
        let loaded = initialize_document(Some(json!({
            "schemaVersion": 1,
            "prompts": { "1": { "id": 1, "text": "a", "hasBeenDaily": false } },
            "nextId": 2,
            "todayPrompt": null
        })))
        .unwrap();

        assert!(!loaded.migrated);
        assert_eq!(loaded.document.prompts[&1].text, "a");
    }

    #[test]
    fn legacy_prefixed_keys_are_migrated() {
        let loaded = initialize_document(Some(json!({
            "prompts": {
                "P1": { "id": 1, "text": "Some cool prompt.", "hasBeenDaily": true, "submissions": null },
                "P2": { "id": 2, "text": "And another one.", "hasBeenDaily": false, "submissions": null },
                "P3": null
            },
            "nextId": 4,
            "todayPrompt": { "date": "2019-06-01T15:30:00.000Z", "promptId": 1 }
        })))
        .unwrap();

        assert!(loaded.migrated);
        let document = loaded.document;
        assert_eq!(document.schema_version, 1);
        assert_eq!(document.prompts.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(document.next_id, 4);
        assert_eq!(document.today_prompt.map(|marker| marker.prompt_id), Some(1));
    }

    #[test]
    fn legacy_document_without_prompts_gets_defaults() {
        let loaded = initialize_document(Some(json!({ "todayPrompt": null }))).unwrap();
        assert!(loaded.migrated);
        assert!(loaded.document.prompts.is_empty());
        assert_eq!(loaded.document.next_id, 1);
    }

    #[test]
    fn rejects_unusable_documents() {
        assert!(initialize_document(Some(json!([1, 2, 3]))).is_err());
        assert!(initialize_document(Some(json!({ "schemaVersion": 99, "nextId": 1 }))).is_err());
        assert!(initialize_document(Some(json!({ "prompts": { "Pabc": { "id": 1, "text": "x" } } }))).is_err());
    }
}
