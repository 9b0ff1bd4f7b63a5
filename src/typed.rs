pub const DEFAULT_PHRASES: [&str; 4] = [
    "Java Applications.",
    "Embedded Systems.",
    "IoT Solutions.",
    "Smart Devices.",
];

pub const DEFAULT_TYPE_SPEED_MS: u32 = 90;
pub const DEFAULT_DELETE_SPEED_MS: u32 = 50;
pub const DEFAULT_PAUSE_MS: u32 = 2_000;
pub const DEFAULT_START_DELAY_MS: u32 = 800;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    pub pause_ms: u32,
    pub start_delay_ms: u32,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_ms: DEFAULT_TYPE_SPEED_MS,
            delete_ms: DEFAULT_DELETE_SPEED_MS,
            pause_ms: DEFAULT_PAUSE_MS,
            start_delay_ms: DEFAULT_START_DELAY_MS,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypedFrame {
    pub text: String,
    pub delay_ms: u32,
}

/// Types each phrase one character per tick, pauses, deletes it, then moves
/// on to the next phrase. Runs forever.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedText {
    phrases: Vec<String>,
    timing: TypingTiming,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl TypedText {
    pub fn new(phrases: Vec<String>, timing: TypingTiming) -> Self {
        let phrases = if phrases.is_empty() {
            DEFAULT_PHRASES.iter().map(ToString::to_string).collect()
        } else {
            phrases
        };

        Self {
            phrases,
            timing,
            phrase: 0,
            chars: 0,
            deleting: false,
        }
    }

    pub fn start_delay_ms(&self) -> u32 {
        self.timing.start_delay_ms
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn char_index(&self) -> usize {
        self.chars
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn step(&mut self) -> TypedFrame {
        let phrase = &self.phrases[self.phrase];
        let length = phrase.chars().count();

        if !self.deleting {
            self.chars = (self.chars + 1).min(length);
            let text = prefix(phrase, self.chars);
            if self.chars == length {
                self.deleting = true;
                return TypedFrame {
                    text,
                    delay_ms: self.timing.pause_ms,
                };
            }
            return TypedFrame {
                text,
                delay_ms: self.timing.type_ms,
            };
        }

        self.chars = self.chars.saturating_sub(1);
        let text = prefix(phrase, self.chars);
        if self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.phrases.len();
        }

        let delay_ms = if self.deleting {
            self.timing.delete_ms
        } else {
            self.timing.type_ms
        };
        TypedFrame { text, delay_ms }
    }
}

fn prefix(phrase: &str, chars: usize) -> String {
    phrase.chars().take(chars).collect()
}
