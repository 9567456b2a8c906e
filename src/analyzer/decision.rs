use crate::model::Decision;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub buy: f64,
    pub sell: f64,
}

impl Thresholds {
    pub fn new(buy: f64, sell: f64) -> Self {
        Self { buy, sell }
    }

    /// Both boundaries are inclusive and BUY is checked first.
    pub fn decide(&self, total: f64) -> Decision {
        if total >= self.buy {
            Decision::Buy
        } else if total <= self.sell {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }
}
