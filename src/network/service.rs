use num_traits::NumAssign;

/// Service level operated on a rail segment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ServiceClass {
    Standard,
    AlfaPendular,
}

impl ServiceClass {
    // per-unit operating cost of routing one train over one segment
    pub fn cost<Flow>(self) -> Flow
    where
        Flow: NumAssign + Copy,
    {
        let two = Flow::one() + Flow::one();
        match self {
            ServiceClass::Standard => two,
            ServiceClass::AlfaPendular => two + two,
        }
    }
}
