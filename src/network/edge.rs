use crate::network::service::ServiceClass;
use num_traits::Zero;
use std::ops::Sub;

#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub capacity: Flow,
    pub flow: Flow,
    pub service: ServiceClass,
    pub cost: Flow,
    pub enabled: bool,
    pub(crate) reverse: Option<usize>,
    pub(crate) corresponding: Option<usize>,
}

impl<Flow> Edge<Flow> {
    pub(crate) fn new(from: usize, to: usize, capacity: Flow, service: ServiceClass, cost: Flow) -> Self
    where
        Flow: Zero,
    {
        Edge { from, to, capacity, flow: Flow::zero(), service, cost, enabled: true, reverse: None, corresponding: None }
    }

    /// Index of the anti-parallel edge created alongside this one, if any.
    #[inline]
    pub fn reverse(&self) -> Option<usize> {
        self.reverse
    }

    /// Index of this edge's counterpart in a parallel graph instance.
    #[inline]
    pub fn corresponding(&self) -> Option<usize> {
        self.corresponding
    }
}

impl<Flow> Edge<Flow>
where
    Flow: Sub<Output = Flow> + Copy,
{
    #[inline]
    pub fn residual_capacity(&self) -> Flow {
        self.capacity - self.flow
    }
}
