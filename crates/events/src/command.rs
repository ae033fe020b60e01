/// A command targets a single storage cell (command abstraction).
///
/// Commands represent **intent**: a request that may still be rejected. They carry
/// raw, unvalidated input exactly as it arrived; turning that input into typed facts
/// is the aggregate's job.
///
/// ## Command vs Event
///
/// - **Command**: intent (e.g., "add 5 Oranges to A112", quantity still text)
/// - **Event**: fact (e.g., `StockAdded { quantity: 5, .. }`, address resolved)
///
/// Each command operates on exactly one cell. Two commands naming different cells
/// never interact.
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name for logs (e.g. "inventory.stock.add").
    fn command_type(&self) -> &'static str;

    /// The cell the command targets, as supplied by the caller.
    fn target(&self) -> &str;
}
