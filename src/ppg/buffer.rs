use std::collections::VecDeque;
/// Flattened view of the detrended window, ready to plot.
#[derive(Clone, Debug)]
pub struct TraceFrame {
    pub frame_rate: f32,
    pub detrended: Vec<f32>,
    pub peak_threshold: f32,
}
impl TraceFrame {
    pub fn duration_seconds(&self) -> f32 {
        self.detrended.len() as f32 / self.frame_rate
    }
}
/// Fixed-capacity FIFO; pushing into a full window evicts the oldest entry.
#[derive(Clone, Debug)]
pub struct SlidingWindow<T> {
    data: VecDeque<T>,
    capacity: usize,
}
impl<T: Copy> SlidingWindow<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }
    /// Entry `back` positions before the newest one (0 = newest).
    pub fn from_back(&self, back: usize) -> Option<T> {
        let len = self.data.len();
        if back >= len {
            return None;
        }
        self.data.get(len - 1 - back).copied()
    }
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.data.iter()
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }
    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn clear(&mut self) {
        self.data.clear();
    }
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().copied().collect()
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn evicts_oldest_once_full() {
        let mut window = SlidingWindow::new(3);
        for v in 1..=5 {
            window.push(v);
        }
        assert!(window.is_full());
        assert_eq!(window.len(), 3);
        assert_eq!(window.to_vec(), vec![3, 4, 5]);
        assert_eq!(window.from_back(0), Some(5));
        assert_eq!(window.from_back(2), Some(3));
        assert_eq!(window.from_back(3), None);
    }
    #[test]
    fn zero_capacity_stays_empty() {
        let mut window = SlidingWindow::new(0);
        window.push(1.0f32);
        assert!(window.is_empty());
    }
    #[test]
    fn trace_duration_uses_frame_rate() {
        let trace = TraceFrame {
            frame_rate: 30.0,
            detrended: vec![0.0; 60],
            peak_threshold: 0.2,
        };
        assert!((trace.duration_seconds() - 2.0).abs() < 1e-6);
    }
}
