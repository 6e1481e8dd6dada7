//! Sequence continuity checks for depth events.
//!
//! A book whose cursor is `last_update_id` can only accept an event whose
//! range `[first_update_id, final_update_id]` contains `last_update_id + 1`.
//! Anything wholly behind the cursor is stale; anything starting past it
//! means updates were lost on the way.

use super::error::OrderBookError;
use super::types::DepthEvent;

/// Whether `event` is already covered by a book at `last_update_id`.
#[inline]
pub fn is_stale(last_update_id: i64, event: &DepthEvent) -> bool {
    event.final_update_id <= last_update_id
}

/// Check that `event` continues the sequence of a book at `last_update_id`
/// without skipping any update.
///
/// # Errors
/// [`OrderBookError::StaleEvent`] when the event lies entirely behind the
/// cursor, [`OrderBookError::SequenceGap`] when it starts after
/// `last_update_id + 1`.
pub fn validate_continuity(
    symbol: &str,
    last_update_id: i64,
    event: &DepthEvent,
) -> Result<(), OrderBookError> {
    if is_stale(last_update_id, event) {
        return Err(OrderBookError::StaleEvent {
            symbol: symbol.to_string(),
            final_update_id: event.final_update_id,
            last_update_id,
        });
    }

    let expected = last_update_id.saturating_add(1);
    if event.first_update_id > expected {
        return Err(OrderBookError::SequenceGap {
            symbol: symbol.to_string(),
            expected,
            first_update_id: event.first_update_id,
        });
    }

    Ok(())
}
