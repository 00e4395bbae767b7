//! Utilities for input path collection and cross-document object copying.

use crate::error::{PdfEditError, Result};
use lopdf::{Document, Object, ObjectId};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Expand input arguments into filesystem paths, preserving argument order.
///
/// Arguments containing glob metacharacters (`*`, `?`, `[`) are expanded and
/// their matches sorted; every other argument is passed through untouched so
/// that a missing file surfaces later as a "file not found" error instead of
/// silently disappearing.
///
/// # Errors
///
/// - An invalid glob pattern.
/// - A glob pattern that matches nothing.
/// - Filesystem errors reported while walking matches.
pub fn collect_paths_for_patterns<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved_paths = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        if is_glob_pattern(pattern) {
            resolved_paths.extend(collect_paths_for_pattern(pattern)?);
        } else {
            resolved_paths.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved_paths)
}

fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

/// Expand a single glob pattern such as `"chapters/*.pdf"`.
fn collect_paths_for_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let invalid = |reason: String| PdfEditError::InvalidPattern {
        pattern: pattern.to_string(),
        reason,
    };

    let mut resolved_paths = Vec::new();
    for entry in glob::glob(pattern).map_err(|err| invalid(err.to_string()))? {
        resolved_paths.push(entry.map_err(|err| invalid(err.to_string()))?);
    }

    if resolved_paths.is_empty() {
        return Err(invalid("no files match".to_string()));
    }

    resolved_paths.sort();
    Ok(resolved_paths)
}

/// Copy every object reachable from `obj` out of `source` into `target`.
///
/// Objects already present in `target` (by id) are not revisited, which both
/// terminates cycles and lets a caller pre-insert objects it wants to keep,
/// such as a page whose `Parent` has been redirected. `follow` is asked about
/// each source object before it is copied; a declined object stays behind
/// and nothing beyond it is walked.
///
/// The walk keeps an explicit worklist, so reference chains of any length
/// are handled without growing the call stack.
pub fn copy_references<F>(target: &mut Document, source: &Document, obj: &Object, follow: F)
where
    F: Fn(&Object) -> bool,
{
    let mut pending = Vec::new();
    push_references(obj, &mut pending);

    while let Some(ref_id) = pending.pop() {
        if target.objects.contains_key(&ref_id) {
            continue;
        }
        let Ok(referenced_obj) = source.get_object(ref_id) else {
            continue;
        };
        if !follow(referenced_obj) {
            continue;
        }

        target.objects.insert(ref_id, referenced_obj.clone());
        push_references(referenced_obj, &mut pending);
    }
}

/// Push the id of every indirect reference held directly inside `obj`.
fn push_references(obj: &Object, pending: &mut Vec<ObjectId>) {
    let mut stack = vec![obj];
    while let Some(obj) = stack.pop() {
        match obj {
            Object::Reference(ref_id) => pending.push(*ref_id),
            Object::Dictionary(dict) => stack.extend(dict.iter().map(|(_, value)| value)),
            Object::Array(arr) => stack.extend(arr.iter()),
            Object::Stream(stream) => stack.extend(stream.dict.iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

/// Replace every reference to an object missing from `doc` with `null`.
///
/// Returns the number of references replaced.
pub fn prune_dangling_references(doc: &mut Document) -> usize {
    let present: BTreeSet<ObjectId> = doc.objects.keys().copied().collect();
    let mut pruned = 0;

    for object in doc.objects.values_mut() {
        let mut stack = vec![object];
        while let Some(obj) = stack.pop() {
            if matches!(obj, Object::Reference(ref_id) if !present.contains(ref_id)) {
                *obj = Object::Null;
                pruned += 1;
                continue;
            }
            match obj {
                Object::Dictionary(dict) => stack.extend(dict.iter_mut().map(|(_, value)| value)),
                Object::Array(arr) => stack.extend(arr.iter_mut()),
                Object::Stream(stream) => {
                    stack.extend(stream.dict.iter_mut().map(|(_, value)| value));
                }
                _ => {}
            }
        }
    }

    pruned
}
