use std::collections::HashSet;

use actx_core::CancellationToken;
use actx_types::{EditStrategy, Error, Message, Part};
use uuid::Uuid;

use crate::estimator::TokenEstimator;

/// Replaces an elided tool-result's text while leaving the Part itself
/// (and its `tool_call_id`) in place, so pairing is never broken.
pub const ELISION_SENTINEL: &str = "[tool result elided]";

/// The result of running one or more [`EditStrategy`] values over a
/// canonical Message sequence.
pub struct StrategyOutcome {
    pub messages: Vec<Message>,
    pub this_time_tokens: u64,
    pub edit_at_message_id: Option<Uuid>,
}

/// Applies `strategies` in order — the output of strategy *i* is the
/// input of strategy *i+1* — checking `cancellation` before each step, per
/// the concurrency model's per-edit-strategy-step checkpoint.
pub fn apply_strategies(
    messages: Vec<Message>,
    strategies: &[EditStrategy],
    estimator: &dyn TokenEstimator,
    cancellation: &CancellationToken,
) -> Result<StrategyOutcome, Error> {
    let mut current = messages;
    for strategy in strategies {
        cancellation.check()?;
        current = match strategy {
            EditStrategy::RemoveToolResult { keep_recent_n_tool_results } => {
                apply_remove_tool_result(current, *keep_recent_n_tool_results)
            }
            EditStrategy::TokenLimit { limit_tokens } => apply_token_limit(current, *limit_tokens, estimator),
            EditStrategy::KeepRecentN { n } => apply_keep_recent_n(current, *n),
        };
    }

    let this_time_tokens = if strategies.is_empty() {
        0
    } else {
        current.iter().map(|m| estimator.estimate(m)).sum()
    };
    let edit_at_message_id = current.first().map(|m| m.id);

    Ok(StrategyOutcome { messages: current, this_time_tokens, edit_at_message_id })
}

fn apply_remove_tool_result(mut messages: Vec<Message>, keep_recent_n_tool_results: usize) -> Vec<Message> {
    let mut positions = Vec::new();
    for (mi, message) in messages.iter().enumerate() {
        for (pi, part) in message.parts.iter().enumerate() {
            if part.is_tool_result() {
                positions.push((mi, pi));
            }
        }
    }
    let total = positions.len();
    if total <= keep_recent_n_tool_results {
        return messages;
    }
    let elide_count = total - keep_recent_n_tool_results;
    for &(mi, pi) in &positions[..elide_count] {
        if let Part::ToolResult { text, .. } = &mut messages[mi].parts[pi] {
            *text = Some(ELISION_SENTINEL.to_string());
        }
    }
    messages
}

/// Extends an initial `keep` set to a fixpoint honoring the pairing-safety
/// rule: a dropped assistant message can never leave behind a retained
/// tool-result that references one of its tool-calls — the referencing
/// message is dropped too.
fn cascade_paired_drops(messages: &[Message], keep: &mut [bool]) {
    loop {
        let mut retained_call_ids: HashSet<&str> = HashSet::new();
        for (i, message) in messages.iter().enumerate() {
            if keep[i] {
                for part in &message.parts {
                    if let Part::ToolCall { meta, .. } = part {
                        if let Some(id) = meta.id() {
                            retained_call_ids.insert(id);
                        }
                    }
                }
            }
        }

        let mut changed = false;
        for (i, message) in messages.iter().enumerate() {
            if !keep[i] {
                continue;
            }
            let references_dropped_call = message.parts.iter().any(|p| match p {
                Part::ToolResult { meta, .. } => meta
                    .tool_call_id()
                    .map(|id| !retained_call_ids.contains(id))
                    .unwrap_or(false),
                _ => false,
            });
            if references_dropped_call {
                keep[i] = false;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }
}

fn apply_token_limit(messages: Vec<Message>, limit_tokens: u64, estimator: &dyn TokenEstimator) -> Vec<Message> {
    if messages.is_empty() {
        return messages;
    }
    let tokens: Vec<u64> = messages.iter().map(|m| estimator.estimate(m)).collect();
    let mut keep = vec![true; messages.len()];

    loop {
        cascade_paired_drops(&messages, &mut keep);
        let sum: u64 = keep.iter().zip(&tokens).filter(|(k, _)| **k).map(|(_, t)| *t).sum();
        if sum <= limit_tokens {
            break;
        }
        match keep.iter().position(|k| *k) {
            Some(oldest_kept) => keep[oldest_kept] = false,
            None => break,
        }
    }

    messages.into_iter().zip(keep).filter_map(|(m, k)| k.then_some(m)).collect()
}

fn apply_keep_recent_n(messages: Vec<Message>, n: usize) -> Vec<Message> {
    let len = messages.len();
    let mut keep = vec![false; len];
    for i in len.saturating_sub(n)..len {
        keep[i] = true;
    }
    cascade_paired_drops(&messages, &mut keep);
    messages.into_iter().zip(keep).filter_map(|(m, k)| k.then_some(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::CharsDiv4Estimator;
    use actx_types::{Meta, MessageMeta, Role, TaskStatus};
    use chrono::Utc;

    fn msg(role: Role, parts: Vec<Part>) -> Message {
        let now = Utc::now();
        Message {
            id: Uuid::new_v4(),
            parent_id: None,
            session_id: "s1".into(),
            role,
            parts,
            created_at: now,
            updated_at: now,
            status: TaskStatus::Success,
            meta: MessageMeta::new(None),
        }
    }

    fn tool_result(tool_call_id: &str, text: &str) -> Part {
        let mut meta = Meta::new();
        meta.set("tool_call_id", tool_call_id);
        Part::ToolResult { text: Some(text.to_string()), meta }
    }

    #[test]
    fn remove_tool_result_elides_all_but_the_most_recent_n_scenario_s5() {
        let messages = vec![
            msg(Role::User, vec![tool_result("c1", "r1")]),
            msg(Role::User, vec![tool_result("c2", "r2")]),
            msg(Role::User, vec![tool_result("c3", "r3")]),
        ];
        let strategies = [EditStrategy::RemoveToolResult { keep_recent_n_tool_results: 1 }];
        let token = CancellationToken::new();
        let outcome = apply_strategies(messages, &strategies, &CharsDiv4Estimator, &token).unwrap();

        let texts: Vec<_> = outcome
            .messages
            .iter()
            .map(|m| match &m.parts[0] {
                Part::ToolResult { text, .. } => text.clone().unwrap(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec![ELISION_SENTINEL, ELISION_SENTINEL, "r3"]);
        // every part keeps its tool_call_id regardless of elision
        for m in &outcome.messages {
            match &m.parts[0] {
                Part::ToolResult { meta, .. } => assert!(meta.tool_call_id().is_some()),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn keep_recent_n_drops_paired_tool_result_with_its_tool_call() {
        let mut call_meta = Meta::new();
        call_meta.set("id", "c1").set("name", "f").set("arguments", "{}");
        let messages = vec![
            msg(Role::Assistant, vec![Part::ToolCall { text: None, meta: call_meta }]),
            msg(Role::User, vec![tool_result("c1", "ok")]),
            msg(Role::User, vec![Part::Text { text: "hi".into(), meta: Meta::new() }]),
        ];
        // n=1 keeps only the last message; the cascade must additionally
        // drop nothing here since the retained message has no tool-result.
        let strategies = [EditStrategy::KeepRecentN { n: 1 }];
        let token = CancellationToken::new();
        let outcome = apply_strategies(messages, &strategies, &CharsDiv4Estimator, &token).unwrap();
        assert_eq!(outcome.messages.len(), 1);
    }

    #[test]
    fn keep_recent_n_cascades_when_boundary_splits_a_pair() {
        let mut call_meta = Meta::new();
        call_meta.set("id", "c1").set("name", "f").set("arguments", "{}");
        let messages = vec![
            msg(Role::Assistant, vec![Part::ToolCall { text: None, meta: call_meta }]),
            msg(Role::User, vec![tool_result("c1", "ok")]),
        ];
        // n=1 would keep only the tool-result message, orphaning the pair;
        // the cascade must drop it too.
        let strategies = [EditStrategy::KeepRecentN { n: 1 }];
        let token = CancellationToken::new();
        let outcome = apply_strategies(messages, &strategies, &CharsDiv4Estimator, &token).unwrap();
        assert!(outcome.messages.is_empty());
    }

    #[test]
    fn strategies_compose_in_order() {
        let messages = vec![
            msg(Role::User, vec![tool_result("c1", "r1")]),
            msg(Role::User, vec![tool_result("c2", "r2")]),
        ];
        let strategies = [
            EditStrategy::RemoveToolResult { keep_recent_n_tool_results: 1 },
            EditStrategy::KeepRecentN { n: 1 },
        ];
        let token = CancellationToken::new();
        let outcome = apply_strategies(messages, &strategies, &CharsDiv4Estimator, &token).unwrap();
        assert_eq!(outcome.messages.len(), 1);
        match &outcome.messages[0].parts[0] {
            Part::ToolResult { text, .. } => assert_eq!(text.as_deref(), Some("r2")),
            _ => unreachable!(),
        }
    }
}
