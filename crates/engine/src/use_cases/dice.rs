//! Dice tray bridge.
//!
//! Rolls are placed in the host's tray and their results arrive later as a
//! separate event. [`RollTracker`] remembers why each roll was made so the
//! result can be applied when it comes back.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::infrastructure::ports::{DiceError, DiceTrayPort, RollId, RollRequest};

// =============================================================================
// Host event shapes
// =============================================================================

pub const ROLL_RESULTS_KIND: &str = "rollResults";

/// Any event the host's dice service emits.
#[derive(Debug, Clone, Deserialize)]
pub struct DiceEvent {
    pub kind: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollResults {
    pub roll_id: RollId,
    #[serde(default)]
    pub results_groups: Vec<ResultsGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResultsGroup {
    #[serde(default)]
    pub result: GroupResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupResult {
    #[serde(default)]
    pub results: Vec<i64>,
}

impl DiceEvent {
    /// The roll results carried by this event, if it is a results event.
    pub fn roll_results(&self) -> Option<RollResults> {
        if self.kind != ROLL_RESULTS_KIND {
            return None;
        }
        match serde_json::from_value(self.payload.clone()) {
            Ok(results) => Some(results),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed roll results payload");
                None
            }
        }
    }
}

// =============================================================================
// Tracking
// =============================================================================

/// A finished roll matched back to the context it was made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoll<C> {
    pub context: C,
    /// Dice of the first result group, in the order the host reported them.
    pub values: Vec<i64>,
    /// Sum over every group.
    pub total: i64,
}

impl<C> ResolvedRoll<C> {
    pub fn first_value(&self) -> Option<i64> {
        self.values.first().copied()
    }
}

/// Rolls stay tracked until their results event arrives. A host that drops
/// a roll never sends one, so callers [`forget`](RollTracker::forget) rolls
/// they stop waiting for.
pub struct RollTracker<C> {
    tray: Arc<dyn DiceTrayPort>,
    pending: Mutex<HashMap<RollId, C>>,
}

impl<C: Send> RollTracker<C> {
    pub fn new(tray: Arc<dyn DiceTrayPort>) -> Self {
        Self {
            tray,
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Put the rolls in the tray and remember `context` until the result
    /// arrives.
    pub async fn roll(&self, rolls: Vec<RollRequest>, context: C) -> Result<RollId, DiceError> {
        let roll_id = self.tray.put_dice_in_tray(rolls).await?;
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(roll_id.clone(), context);
        tracing::debug!(roll_id = %roll_id.0, "Tracking roll");
        Ok(roll_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Stop waiting for a roll, returning the context it was made for.
    pub fn forget(&self, roll_id: &RollId) -> Option<C> {
        let context = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(roll_id);
        if context.is_some() {
            tracing::debug!(roll_id = %roll_id.0, "Forgot pending roll");
        }
        context
    }

    /// Match an event to a tracked roll. Events for rolls this tracker did
    /// not make are ignored. A tracked roll is forgotten once its event
    /// arrives, even if the event carries no dice.
    pub fn resolve(&self, event: &DiceEvent) -> Option<ResolvedRoll<C>> {
        let roll_id: RollId = event
            .payload
            .get("rollId")
            .and_then(|v| serde_json::from_value(v.clone()).ok())?;

        let context = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&roll_id);
        let Some(context) = context else {
            tracing::debug!(roll_id = %roll_id.0, "Ignoring untracked roll");
            return None;
        };

        let results = event.roll_results()?;
        let values = results
            .results_groups
            .first()
            .map(|g| g.result.results.clone())
            .unwrap_or_default();
        let total: i64 = results
            .results_groups
            .iter()
            .flat_map(|g| g.result.results.iter())
            .sum();

        Some(ResolvedRoll {
            context,
            values,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockDiceTrayPort;

    fn results_event(roll_id: &str, groups: &[&[i64]]) -> DiceEvent {
        let groups: Vec<serde_json::Value> = groups
            .iter()
            .map(|g| serde_json::json!({"result": {"results": g}}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "kind": "rollResults",
            "payload": {"rollId": roll_id, "resultsGroups": groups}
        }))
        .unwrap()
    }

    fn tracker_returning(id: &'static str) -> RollTracker<&'static str> {
        let mut tray = MockDiceTrayPort::new();
        tray.expect_put_dice_in_tray()
            .withf(|rolls| rolls.len() == 1 && rolls[0].roll == "2d10+2")
            .returning(move |_| Ok(RollId(id.to_string())));
        RollTracker::new(Arc::new(tray))
    }

    #[tokio::test]
    async fn resolves_tracked_roll_once() {
        let tracker = tracker_returning("roll-7");
        let id = tracker
            .roll(vec![RollRequest::new("Might Test", "2d10+2")], "might")
            .await
            .unwrap();
        assert_eq!(id, RollId("roll-7".into()));
        assert_eq!(tracker.pending_count(), 1);

        let event = results_event("roll-7", &[&[4, 9], &[2]]);
        let resolved = tracker.resolve(&event).unwrap();
        assert_eq!(resolved.context, "might");
        assert_eq!(resolved.values, vec![4, 9]);
        assert_eq!(resolved.first_value(), Some(4));
        assert_eq!(resolved.total, 15);

        assert!(tracker.resolve(&event).is_none());
        assert_eq!(tracker.pending_count(), 0);
    }

    #[tokio::test]
    async fn untracked_and_other_events_are_ignored() {
        let tracker = tracker_returning("roll-1");
        tracker
            .roll(vec![RollRequest::new("Might Test", "2d10+2")], "might")
            .await
            .unwrap();

        assert!(tracker.resolve(&results_event("roll-2", &[&[3]])).is_none());
        let other: DiceEvent = serde_json::from_value(serde_json::json!({
            "kind": "rollRemoved",
            "payload": {"rollId": "roll-1"}
        }))
        .unwrap();
        assert!(tracker.resolve(&other).is_none());
        assert_eq!(tracker.pending_count(), 0);
    }

    #[tokio::test]
    async fn forgotten_roll_is_no_longer_resolved() {
        let tracker = tracker_returning("roll-3");
        let id = tracker
            .roll(vec![RollRequest::new("Might Test", "2d10+2")], "might")
            .await
            .unwrap();

        assert_eq!(tracker.forget(&id), Some("might"));
        assert_eq!(tracker.pending_count(), 0);
        assert!(tracker.resolve(&results_event("roll-3", &[&[5]])).is_none());
        assert_eq!(tracker.forget(&id), None);
    }

    #[tokio::test]
    async fn tray_rejection_is_not_tracked() {
        let mut tray = MockDiceTrayPort::new();
        tray.expect_put_dice_in_tray()
            .returning(|_| Err(DiceError::Rejected("tray closed".into())));
        let tracker: RollTracker<()> = RollTracker::new(Arc::new(tray));

        assert!(tracker
            .roll(vec![RollRequest::new("Power Roll", "2d10")], ())
            .await
            .is_err());
        assert_eq!(tracker.pending_count(), 0);
    }
}
