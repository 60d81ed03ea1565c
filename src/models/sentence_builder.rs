//! Sentence-builder exercise: rebuild a sentence from its shuffled words.
//!
//! The sentence's whitespace tokens go into a shuffled bank; the learner
//! picks them back in order. Wrong picks count as mistakes and the mistake
//! count maps to a recall quality for the scheduler.

use rand::rng;
use rand::seq::SliceRandom;

pub struct SentenceBuilder {
    answer: Vec<String>,
    /// Tokens not yet placed, in shuffled order.
    pub bank: Vec<String>,
    /// Tokens placed so far. Always a correct prefix of the sentence.
    pub assembled: Vec<String>,
    pub mistakes: u32,
}

impl SentenceBuilder {
    /// Quality reported when the learner gives up on a sentence.
    pub const ABANDONED_QUALITY: i32 = 1;

    pub fn new(sentence: &str) -> Self {
        let answer: Vec<String> = sentence.split_whitespace().map(str::to_string).collect();
        let mut bank = answer.clone();
        bank.shuffle(&mut rng());

        Self {
            answer,
            bank,
            assembled: Vec::new(),
            mistakes: 0,
        }
    }

    /// Tries to place the bank token at `index` as the next word of the
    /// sentence. A wrong pick leaves the board unchanged and counts as a
    /// mistake; returns whether the pick matched.
    pub fn pick(&mut self, index: usize) -> bool {
        let Some(token) = self.bank.get(index) else {
            return false;
        };

        if self.answer.get(self.assembled.len()) == Some(token) {
            let token = self.bank.remove(index);
            self.assembled.push(token);
            true
        } else {
            self.mistakes += 1;
            false
        }
    }

    pub fn is_complete(&self) -> bool {
        self.assembled.len() == self.answer.len()
    }

    pub fn progress(&self) -> String {
        self.assembled.join(" ")
    }

    /// Recall quality to feed the scheduler once the sentence is rebuilt:
    /// flawless runs rate 5, a couple of slips 4, anything worse 3.
    pub fn suggested_quality(&self) -> i32 {
        match self.mistakes {
            0 => 5,
            1 | 2 => 4,
            _ => 3,
        }
    }
}
