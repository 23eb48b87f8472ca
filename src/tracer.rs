use crate::{NodeId, NodeKind};

/// Which hook of the execution contract an event was recorded at.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum TracePhase {
    Entry,
    Update,
    Exit,
}

/// One recorded node visit.
#[derive(Debug, Clone)]
pub struct TraceEvent {
    pub node: NodeId,
    pub name: String,
    pub kind: NodeKind,
    pub phase: TracePhase,
}

/// Diagnostic observer of a tree's execution.
///
/// While tracing is enabled the engine records an ordered
/// entry/update/exit event for every node visited, counts entries, and
/// remembers the visit order. Nothing is cleared automatically; call
/// [`Tracer::reset`] between ticks to get per-tick data.
#[derive(Default)]
pub struct Tracer {
    events: Vec<TraceEvent>,
    visited: Vec<NodeId>,
    visit_count: usize,
}

impl Tracer {
    pub(crate) fn record(&mut self, node: NodeId, name: &str, kind: NodeKind, phase: TracePhase) {
        let phase_label = match phase {
            TracePhase::Entry => "Node Entry",
            TracePhase::Update => "Node Update",
            TracePhase::Exit => "Node Exit",
        };
        tracing::trace!("ID:{} - Node: {} - {} - {}", node, name, kind, phase_label);

        if let TracePhase::Entry = phase {
            self.visited.push(node);
            self.visit_count += 1;
        }
        self.events.push(TraceEvent {
            node,
            name: name.to_owned(),
            kind,
            phase,
        });
    }

    /// All events recorded since the last reset, in execution order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Nodes entered since the last reset, in visit order.
    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    /// Number of node entries since the last reset.
    pub fn visit_count(&self) -> usize {
        self.visit_count
    }

    pub fn reset(&mut self) {
        self.events.clear();
        self.visited.clear();
        self.visit_count = 0;
    }
}
