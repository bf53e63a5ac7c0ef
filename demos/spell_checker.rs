//! A small spell checker over a word-frequency list.
//!
//! Run with: `cargo run --example spell_checker`

use symdex::prelude::*;

fn main() {
    // Frequencies loosely mirror English usage so ties resolve sensibly.
    let dictionary = [
        ("the", 23_135_851_162_i64),
        ("of", 13_151_942_776),
        ("and", 12_997_637_966),
        ("their", 782_849_411),
        ("there", 701_170_205),
        ("receive", 102_565_599),
        ("separate", 42_117_022),
        ("definitely", 14_345_554),
        ("occurrence", 3_649_415),
        ("misspelling", 926_004),
    ];

    let mut index = SymSpell::new(MemoryStore::new());
    for (word, count) in dictionary {
        index.insert(word, count);
    }

    let typos = [
        "teh",
        "recieve",
        "seperate",
        "definately",
        "occurence",
        "thier",
        "misspeling",
        "correct",
    ];

    for typo in typos {
        let suggestions = index.lookup(typo, Verbosity::Closest);
        match suggestions.first() {
            Some(s) => println!("{typo:<12} -> {:<12} (distance {}, frequency {})", s.term, s.distance, s.frequency),
            None => println!("{typo:<12} -> no suggestion within distance {}", index.max_edit_distance()),
        }
    }
}
