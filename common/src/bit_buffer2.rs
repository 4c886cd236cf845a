//! Bit-packed 2D buffer for boolean masks.
//!
//! One bit per pixel, so a foreground mask or visited set for a 12 MP photo
//! stays around 1.5 MB.

const BITS_PER_WORD: usize = 64;

/// A 2D buffer of booleans packed into `u64` words, indexed `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitBuffer2 {
    words: Vec<u64>,
    width: usize,
    height: usize,
    len: usize,
}

impl BitBuffer2 {
    /// Create a new bit buffer filled with the given value.
    #[inline]
    pub fn new_filled(width: usize, height: usize, value: bool) -> Self {
        let len = width * height;
        let num_words = len.div_ceil(BITS_PER_WORD);
        let fill = if value { !0u64 } else { 0u64 };
        let mut buffer = Self {
            words: vec![fill; num_words],
            width,
            height,
            len,
        };
        buffer.clear_tail();
        buffer
    }

    /// Create a new bit buffer with all bits cleared.
    #[inline]
    pub fn new_default(width: usize, height: usize) -> Self {
        Self::new_filled(width, height, false)
    }

    /// Build a buffer by evaluating `f` at every linear index.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut buffer = Self::new_default(width, height);
        for idx in 0..buffer.len {
            if f(idx) {
                buffer.words[idx / BITS_PER_WORD] |= 1u64 << (idx % BITS_PER_WORD);
            }
        }
        buffer
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len);
        (self.words[idx / BITS_PER_WORD] >> (idx % BITS_PER_WORD)) & 1 != 0
    }

    /// Set the bit and report whether it was already set.
    #[inline]
    pub fn test_and_set(&mut self, idx: usize) -> bool {
        debug_assert!(idx < self.len);
        let word = &mut self.words[idx / BITS_PER_WORD];
        let mask = 1u64 << (idx % BITS_PER_WORD);
        let was_set = *word & mask != 0;
        *word |= mask;
        was_set
    }

    /// Count the number of set bits.
    #[inline]
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Unused high bits of the last word stay zero so `count_ones` is exact.
    fn clear_tail(&mut self) {
        let used = self.len % BITS_PER_WORD;
        if used != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << used) - 1;
            }
        }
    }
}
