#![deny(warnings)]

/// A cursor over a fully materialized token buffer.
///
/// Each scanner owns its buffer and position, so every parse gets an
/// independent cursor instead of sharing pending input.
#[derive(Clone, Debug)]
pub struct Scanner<T: Clone> {
    buf: Vec<T>,
    pos: usize,
}

impl<T: Clone> Iterator for Scanner<T> {
    type Item = T;
    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buf.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        item
    }
}

impl<T: Clone> Scanner<T> {
    pub fn new(buf: Vec<T>) -> Scanner<T> {
        Scanner{buf, pos: 0}
    }

    // number of items consumed so far
    pub fn pos(&self) -> usize { self.pos }

    pub fn peek(&self) -> Option<T> {
        self.buf.get(self.pos).cloned()
    }

    pub fn is_done(&self) -> bool {
        self.pos >= self.buf.len()
    }
}
