use std::collections::VecDeque;

use shared_resources::request::FloorRequest;

/// Requests that arrived while every lift was busy, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct PendingRequestQueue {
    requests: VecDeque<FloorRequest>,
}

impl PendingRequestQueue {
    pub fn new() -> Self {
        PendingRequestQueue { requests: VecDeque::new() }
    }

    pub fn enqueue(&mut self, request: FloorRequest) {
        self.requests.push_back(request);
    }

    pub fn dequeue_one(&mut self) -> Option<FloorRequest> {
        self.requests.pop_front()
    }

    /// Puts a request that could not be served back at the head, so it keeps
    /// its place ahead of later arrivals.
    pub fn requeue_front(&mut self, request: FloorRequest) {
        self.requests.push_front(request);
    }

    /// Drops every queued request for `floor`. Returns how many were removed.
    pub fn remove_floor(&mut self, floor: u8) -> usize {
        let before = self.requests.len();
        self.requests.retain(|request| request.floor != floor);
        before - self.requests.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FloorRequest> {
        self.requests.iter()
    }
}
