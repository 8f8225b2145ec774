use std::sync::Arc;

use anyhow::Context as _;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use super::path_segments;

#[derive(Clone, Debug, Default)]
pub struct MemoryDocumentStore {
    root: Arc<RwLock<Option<Value>>>,
}

impl MemoryDocumentStore {
    pub async fn read(&self, path: &str) -> anyhow::Result<Option<Value>> {
        let root = self.root.read().await;
        let Some(mut node) = (*root).as_ref() else {
            return Ok(None);
        };

        for segment in path_segments(path) {
            let child = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };

            match child {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }

        if node.is_null() {
            Ok(None)
        } else {
            Ok(Some(node.clone()))
        }
    }

    pub async fn write(&self, path: &str, value: Value) -> anyhow::Result<()> {
        let mut root = self.root.write().await;
        let mut node = root.get_or_insert(Value::Null);

        for segment in path_segments(path) {
            node = child_or_insert(node, segment)?;
        }

        *node = value;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> anyhow::Result<()> {
        let segments = path_segments(path);
        let mut root = self.root.write().await;

        let Some((last, parents)) = segments.split_last() else {
            *root = None;
            return Ok(());
        };

        let Some(mut node) = (*root).as_mut() else {
            return Ok(());
        };

        for segment in parents {
            let child = match node {
                Value::Object(map) => map.get_mut(*segment),
                Value::Array(items) => match segment.parse::<usize>() {
                    Ok(index) => items.get_mut(index),
                    Err(_) => None,
                },
                _ => None,
            };

            match child {
                Some(child) => node = child,
                None => return Ok(()),
            }
        }

        match node {
            Value::Object(map) => {
                map.remove(*last);
            }
            Value::Array(items) => {
                // Keep later indices stable.
                if let Some(slot) = last
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index))
                {
                    *slot = Value::Null;
                }
            }
            _ => {}
        }

        Ok(())
    }
}

fn child_or_insert<'a>(node: &'a mut Value, segment: &str) -> anyhow::Result<&'a mut Value> {
    if !(node.is_object() || node.is_array()) {
        *node = Value::Object(Map::new());
    }

    match node {
        Value::Array(items) => {
            let index = segment
                .parse::<usize>()
                .with_context(|| format!("`{segment}` is not a valid array index"))?;
            if index == items.len() {
                items.push(Value::Null);
            }
            items
                .get_mut(index)
                .ok_or_else(|| anyhow::anyhow!("array index {index} is past the end of the list"))
        }
        Value::Object(map) => Ok(map.entry(segment.to_owned()).or_insert(Value::Null)),
        _ => anyhow::bail!("cannot descend into `{segment}`"),
    }
}
