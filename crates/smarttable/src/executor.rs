//! Retry-bounded path executor.
//!
//! Runs planned paths against real primitives and keeps the position cursor
//! in step with what the primitives report. A primitive that reports failure,
//! or a primitive the path needs but the grid does not offer, is a fatal
//! configuration defect. The only retrying is the windowed `goToPage` loop.

use crate::config::NavigationConfig;
use crate::driver::GridDriver;
use crate::planner::{plan_path, NavPath, NavStep};
use crate::primitives::{NavigationPrimitives, PrimitiveOutcome};
use crate::result::{TableError, TableResult};
use tracing::{debug, trace, warn};

/// Execute every step of `path`, updating `cursor` after each primitive call
pub async fn execute_path(
    path: &NavPath,
    target: usize,
    primitives: &NavigationPrimitives,
    driver: &dyn GridDriver,
    cursor: &mut usize,
) -> TableResult<()> {
    for step in path {
        execute_step(*step, target, primitives, driver, cursor).await?;
    }
    Ok(())
}

async fn execute_step(
    step: NavStep,
    target: usize,
    primitives: &NavigationPrimitives,
    driver: &dyn GridDriver,
    cursor: &mut usize,
) -> TableResult<()> {
    let (forward, nominal) = match step {
        NavStep::GoToPage(page) => {
            let Some(jump) = primitives.go_to_page() else {
                return Err(missing_primitive(step.primitive_name(), target));
            };
            if !jump.jump(driver, page).await? {
                return Err(primitive_failed(step.primitive_name(), target, *cursor));
            }
            *cursor = page;
            return Ok(());
        }
        NavStep::Next(_) => (true, 1),
        NavStep::NextBulk(_) => (true, primitives.next_bulk_pages()),
        NavStep::Previous(_) => (false, 1),
        NavStep::PreviousBulk(_) => (false, primitives.previous_bulk_pages()),
    };

    let Some(primitive) = primitives.for_step(&step) else {
        return Err(missing_primitive(step.primitive_name(), target));
    };

    for call in 0..step.primitive_calls() {
        let moved = match primitive.invoke(driver).await? {
            PrimitiveOutcome::Success => nominal,
            PrimitiveOutcome::Advanced(n) if n > 0 => n,
            PrimitiveOutcome::Advanced(_) | PrimitiveOutcome::Failure => {
                return Err(primitive_failed(step.primitive_name(), target, *cursor));
            }
        };
        *cursor = if forward {
            *cursor + moved
        } else {
            cursor.saturating_sub(moved)
        };
        trace!(
            primitive = step.primitive_name(),
            call,
            moved,
            position = *cursor,
            target,
            "primitive call completed"
        );
    }
    Ok(())
}

/// Reach `target` through a `goToPage` that only works for nearby targets.
///
/// Every failed jump is followed by exactly one corrective step toward the
/// target. Bulk moves are preferred when they do not pass the target, or
/// when they land closer and a step back exists.
pub async fn execute_with_go_to_page_retry(
    target: usize,
    primitives: &NavigationPrimitives,
    driver: &dyn GridDriver,
    cursor: &mut usize,
    max_retries: usize,
) -> TableResult<()> {
    let Some(jump) = primitives.go_to_page() else {
        return Err(missing_primitive("goToPage", target));
    };

    let mut retries = 0;
    while *cursor != target {
        if jump.jump(driver, target).await? {
            debug!(target, from = *cursor, retries, "goToPage reached target");
            *cursor = target;
            return Ok(());
        }
        if retries >= max_retries {
            warn!(target, position = *cursor, retries, "goToPage retry limit exceeded");
            return Err(TableError::RetryLimitExceeded {
                target,
                retries: max_retries,
                position: *cursor,
            });
        }
        retries += 1;

        let step = corrective_step(*cursor, target, primitives)?;
        debug!(target, position = *cursor, retries, step = %step, "goToPage missed, stepping toward target");
        execute_step(step, target, primitives, driver, cursor).await?;
    }
    Ok(())
}

fn corrective_step(
    cursor: usize,
    target: usize,
    primitives: &NavigationPrimitives,
) -> TableResult<NavStep> {
    let caps = primitives.capabilities();
    let (remaining, bulk, toward, back, bulk_step, single_step) = if target > cursor {
        (
            target - cursor,
            caps.go_next_bulk,
            caps.go_next,
            caps.go_previous,
            NavStep::NextBulk(1),
            NavStep::Next(1),
        )
    } else {
        (
            cursor - target,
            caps.go_previous_bulk,
            caps.go_previous,
            caps.go_next,
            NavStep::PreviousBulk(1),
            NavStep::Previous(1),
        )
    };

    if let Some(stride) = bulk {
        if stride <= remaining || (back && stride - remaining < remaining) {
            return Ok(bulk_step);
        }
    }
    if toward {
        return Ok(single_step);
    }
    if bulk.is_some() {
        return Ok(bulk_step);
    }
    Err(missing_primitive(single_step.primitive_name(), target))
}

/// Move `cursor` to `target` with whatever primitives are offered.
///
/// Uses the `goToPage` retry loop when a jump primitive exists; otherwise
/// plans a path and re-plans (up to `config.max_replans` times) when bulk
/// steps land off target.
pub async fn navigate_to(
    target: usize,
    primitives: &NavigationPrimitives,
    driver: &dyn GridDriver,
    cursor: &mut usize,
    config: &NavigationConfig,
) -> TableResult<()> {
    if *cursor == target {
        return Ok(());
    }
    if primitives.go_to_page().is_some() {
        return execute_with_go_to_page_retry(
            target,
            primitives,
            driver,
            cursor,
            config.max_go_to_page_retries,
        )
        .await;
    }

    let available = primitives.capabilities();
    let mut last_step = None;
    for attempt in 0..=config.max_replans {
        let path = plan_path(*cursor, target, &available);
        if path.is_empty() {
            let primitive = if target > *cursor { "goNext" } else { "goPrevious" };
            return Err(missing_primitive(primitive, target));
        }
        debug!(
            target,
            position = *cursor,
            attempt,
            calls = path.primitive_calls(),
            path = %path,
            "executing navigation path"
        );
        execute_path(&path, target, primitives, driver, cursor).await?;
        if *cursor == target {
            return Ok(());
        }
        debug!(target, position = *cursor, attempt, "landed off target, re-planning");
        last_step = path.steps().last().copied();
    }

    let primitive = last_step.map_or("goNext", |step| step.primitive_name());
    Err(primitive_failed(primitive, target, *cursor))
}

fn missing_primitive(primitive: &'static str, target: usize) -> TableError {
    warn!(primitive, target, "required navigation primitive missing");
    TableError::MissingPrimitive { primitive, target }
}

fn primitive_failed(primitive: &'static str, target: usize, position: usize) -> TableError {
    warn!(primitive, target, position, "navigation primitive reported failure");
    TableError::PrimitiveFailed {
        primitive,
        target,
        position,
    }
}
