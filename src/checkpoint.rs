//! Typed checkpoint import for agent parameters.
//!
//! Training harnesses save agent parameters in a named-tensor archive with
//! every key namespaced under [`CHECKPOINT_KEY_PREFIX`]. Importing strips
//! that prefix and requires the remaining key set to exactly match the
//! target variable store, failing with a structured error otherwise. There
//! are no silent skips: unprefixed, missing, unknown, and mis-shaped
//! parameters are all distinct failures.
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tch::{nn::VarStore, Device, TchError, Tensor};
use thiserror::Error;

/// Key namespace the harness prepends to every agent parameter.
pub const CHECKPOINT_KEY_PREFIX: &str = "agent.";

/// Error importing a checkpoint archive.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("no checkpoint path configured")]
    NoPathConfigured,
    #[error("failed to read checkpoint {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: TchError,
    },
    #[error("checkpoint key {key:?} lacks the {prefix:?} prefix")]
    UnprefixedKey { key: String, prefix: String },
    #[error("checkpoint is missing parameters: {0:?}")]
    MissingParameters(Vec<String>),
    #[error("checkpoint contains unknown parameters: {0:?}")]
    UnknownParameters(Vec<String>),
    #[error("size mismatch for {name:?}: checkpoint {checkpoint:?}, model {model:?}")]
    SizeMismatch {
        name: String,
        checkpoint: Vec<i64>,
        model: Vec<i64>,
    },
}

/// Read a named-tensor archive onto `device` and strip `prefix` from every key.
///
/// Fails if any key does not carry the prefix.
pub fn read_prefixed_tensors(
    path: &Path,
    device: Device,
    prefix: &str,
) -> Result<Vec<(String, Tensor)>, CheckpointError> {
    let entries =
        Tensor::load_multi_with_device(path, device).map_err(|source| CheckpointError::Read {
            path: path.to_owned(),
            source,
        })?;
    entries
        .into_iter()
        .map(|(key, tensor)| match key.strip_prefix(prefix) {
            Some(stripped) => Ok((stripped.to_owned(), tensor)),
            None => Err(CheckpointError::UnprefixedKey {
                key,
                prefix: prefix.to_owned(),
            }),
        })
        .collect()
}

/// Copy stripped checkpoint entries into a variable store.
///
/// The entry key set must exactly equal the store's variable names and every
/// tensor size must match. All checks run before any parameter is written,
/// so a failed call leaves the store untouched.
pub fn apply_tensors(
    vs: &mut VarStore,
    entries: Vec<(String, Tensor)>,
) -> Result<(), CheckpointError> {
    let entries: HashMap<String, Tensor> = entries.into_iter().collect();
    let variables = vs.variables();

    let mut missing: Vec<String> = variables
        .keys()
        .filter(|name| !entries.contains_key(*name))
        .cloned()
        .collect();
    if !missing.is_empty() {
        missing.sort();
        return Err(CheckpointError::MissingParameters(missing));
    }

    let mut unknown: Vec<String> = entries
        .keys()
        .filter(|name| !variables.contains_key(*name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        unknown.sort();
        return Err(CheckpointError::UnknownParameters(unknown));
    }

    for (name, variable) in &variables {
        let value = &entries[name];
        if variable.size() != value.size() {
            return Err(CheckpointError::SizeMismatch {
                name: name.clone(),
                checkpoint: value.size(),
                model: variable.size(),
            });
        }
    }

    tch::no_grad(|| {
        for (name, mut variable) in variables {
            let _ = variable.copy_(&entries[&name]);
        }
    });
    Ok(())
}

/// Load a prefixed checkpoint archive into a variable store.
///
/// `device` is resolved once by the caller; there is no conditional device
/// mapping at load time.
pub fn load_var_store(
    vs: &mut VarStore,
    path: &Path,
    device: Device,
    prefix: &str,
) -> Result<(), CheckpointError> {
    let entries = read_prefixed_tensors(path, device, prefix)?;
    apply_tensors(vs, entries)
}
