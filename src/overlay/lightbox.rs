/// Full-screen image viewer over an ordered set of `len` images.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    open: Option<usize>,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self { len, open: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Index of the image on screen, if any.
    pub fn current(&self) -> Option<usize> {
        self.open
    }

    /// Show image `index`. Out-of-range indices are ignored.
    pub fn open(&mut self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        self.open = Some(index);
        true
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn next(&mut self) -> Option<usize> {
        self.shift(1)
    }

    pub fn prev(&mut self) -> Option<usize> {
        self.shift(self.len.saturating_sub(1))
    }

    fn shift(&mut self, by: usize) -> Option<usize> {
        let i = self.open?;
        let next = (i + by) % self.len;
        self.open = Some(next);
        Some(next)
    }
}
