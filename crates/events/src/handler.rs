use depot_core::Aggregate;

use crate::Event;

/// Execute an aggregate command deterministically (no IO).
///
/// 1. **Decide**: calls `aggregate.handle(command)` to get events (pure, no mutation)
/// 2. **Evolve**: applies each event to the aggregate via `aggregate.apply(event)`
///
/// If `handle` rejects the command the aggregate is returned untouched, which is what
/// makes every command atomic: either all of its events are applied or none are.
pub fn execute<A>(aggregate: &mut A, command: &A::Command) -> Result<Vec<A::Event>, A::Error>
where
    A: Aggregate,
    A::Event: Event,
{
    let events = A::handle(aggregate, command)?;
    for ev in &events {
        tracing::trace!(event_type = ev.event_type(), "applying event");
        A::apply(aggregate, ev);
    }
    Ok(events)
}
