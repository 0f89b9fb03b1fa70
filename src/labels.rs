//! Reference label table for the production wildlife model.

/// Class names of the 20-class wildlife detection model, in score-channel
/// order. Callers running other model versions pass their own table.
pub const WILDLIFE_CLASSES: [&str; 20] = [
    "Buffalo", "Camel", "Cat", "Cheetah", "Cow", "Deer", "Dog", "Elephant", "Goat", "Gorilla",
    "Hippo", "Horse", "Lion", "Monkeys", "Panda", "Rat", "Rhino", "Tiger", "Wolf", "Zebra",
];
