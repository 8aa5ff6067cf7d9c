//! Per-user ignore list management.

use crate::database::RecordStore;
use crate::errors::AppResult;
use crate::types::{UserId, UserStatsRecord};
use std::collections::BTreeSet;
use tracing::debug;

/// Normalize a user-supplied extension token: trimmed, lowercased, leading dot.
///
/// Returns `None` for blank tokens and for tokens that can never match a
/// file's extension: compound ones like `tar.gz` (files report `.gz`) or
/// ones with inner whitespace.
pub fn normalize_extension(token: &str) -> Option<String> {
    let token = token.trim().to_lowercase();
    let body = token.strip_prefix('.').unwrap_or(&token);
    if body.is_empty() || body.contains('.') || body.contains(char::is_whitespace) {
        return None;
    }
    Some(format!(".{}", body))
}

/// Non-blank tokens that [`normalize_extension`] refuses
pub fn rejected_tokens<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    tokens
        .iter()
        .map(|token| token.as_ref().trim())
        .filter(|token| !token.is_empty() && normalize_extension(token).is_none())
        .map(str::to_string)
        .collect()
}

/// Normalize every token, dropping blanks and duplicates but keeping first-seen order
pub fn normalize_all<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tokens
        .iter()
        .filter_map(|token| normalize_extension(token.as_ref()))
        .filter(|extension| seen.insert(extension.clone()))
        .collect()
}

/// Add extensions to the record's ignore set; returns the ones that were new
pub fn add_to_record<S: AsRef<str>>(record: &mut UserStatsRecord, tokens: &[S]) -> Vec<String> {
    normalize_all(tokens)
        .into_iter()
        .filter(|extension| record.ignored_extensions.insert(extension.clone()))
        .collect()
}

/// Remove extensions from the record's ignore set; returns the ones that were present
pub fn remove_from_record<S: AsRef<str>>(
    record: &mut UserStatsRecord,
    tokens: &[S],
) -> Vec<String> {
    normalize_all(tokens)
        .into_iter()
        .filter(|extension| record.ignored_extensions.remove(extension))
        .collect()
}

pub fn add_ignored<R, S>(store: &R, user_id: UserId, tokens: &[S]) -> AppResult<Vec<String>>
where
    R: RecordStore + ?Sized,
    S: AsRef<str>,
{
    let mut record = store.get(user_id)?;
    let added = add_to_record(&mut record, tokens);
    if !added.is_empty() {
        store.put(user_id, &record)?;
        debug!("User {} now ignores {:?}", user_id, added);
    }
    Ok(added)
}

pub fn remove_ignored<R, S>(store: &R, user_id: UserId, tokens: &[S]) -> AppResult<Vec<String>>
where
    R: RecordStore + ?Sized,
    S: AsRef<str>,
{
    let mut record = store.get(user_id)?;
    let removed = remove_from_record(&mut record, tokens);
    if !removed.is_empty() {
        store.put(user_id, &record)?;
        debug!("User {} no longer ignores {:?}", user_id, removed);
    }
    Ok(removed)
}

pub fn list_ignored<R>(store: &R, user_id: UserId) -> AppResult<BTreeSet<String>>
where
    R: RecordStore + ?Sized,
{
    Ok(store.get(user_id)?.ignored_extensions)
}
