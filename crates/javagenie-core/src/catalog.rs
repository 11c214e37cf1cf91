use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a catalog entry. Serialized with the wire keys the
/// browser page uses (`NUMBER_GUESS`, `RPS`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameKind {
    NumberGuess,
    Rps,
    DiceRoll,
    TicTacToe,
    Snake,
    PingPong,
    #[serde(rename = "SHOOTER_2D")]
    Shooter2d,
    Hangman,
    Quiz,
    Maze,
}

impl GameKind {
    /// The one entry with a playable demo and a static code sample.
    pub const DEMO: GameKind = GameKind::NumberGuess;

    pub const ALL: [GameKind; 10] = [
        GameKind::NumberGuess,
        GameKind::Rps,
        GameKind::DiceRoll,
        GameKind::TicTacToe,
        GameKind::Snake,
        GameKind::PingPong,
        GameKind::Shooter2d,
        GameKind::Hangman,
        GameKind::Quiz,
        GameKind::Maze,
    ];

    pub fn key(self) -> &'static str {
        match self {
            GameKind::NumberGuess => "NUMBER_GUESS",
            GameKind::Rps => "RPS",
            GameKind::DiceRoll => "DICE_ROLL",
            GameKind::TicTacToe => "TIC_TAC_TOE",
            GameKind::Snake => "SNAKE",
            GameKind::PingPong => "PING_PONG",
            GameKind::Shooter2d => "SHOOTER_2D",
            GameKind::Hangman => "HANGMAN",
            GameKind::Quiz => "QUIZ",
            GameKind::Maze => "MAZE",
        }
    }

    pub fn from_key(key: &str) -> Option<GameKind> {
        GameKind::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub fn is_demo(self) -> bool {
        self == GameKind::DEMO
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

/// Static metadata for one teaching game in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameDescriptor {
    pub id: GameKind,
    pub title: &'static str,
    pub description: &'static str,
    /// Icon tag resolved by the page; unknown tags render a generic gamepad.
    pub icon: &'static str,
    pub has_demo: bool,
    pub difficulty: Difficulty,
    pub tags: &'static [&'static str],
}

static CATALOG: [GameDescriptor; 10] = [
    GameDescriptor {
        id: GameKind::NumberGuess,
        title: "Number Guessing",
        description: "The classic game where the computer picks a number and you guess it.",
        icon: "target",
        has_demo: true,
        difficulty: Difficulty::Beginner,
        tags: &["Console", "Loops", "Conditionals"],
    },
    GameDescriptor {
        id: GameKind::Rps,
        title: "Rock Paper Scissors",
        description: "Battle the computer in this timeless hand game.",
        icon: "scissors",
        has_demo: false,
        difficulty: Difficulty::Beginner,
        tags: &["Console", "Random", "Logic"],
    },
    GameDescriptor {
        id: GameKind::DiceRoll,
        title: "Dice Roll",
        description: "Simple luck-based game. Highest roll wins.",
        icon: "dices",
        has_demo: false,
        difficulty: Difficulty::Beginner,
        tags: &["Console", "Math"],
    },
    GameDescriptor {
        id: GameKind::TicTacToe,
        title: "Tic-Tac-Toe",
        description: "A 3x3 grid strategy game for two players.",
        icon: "grid",
        has_demo: false,
        difficulty: Difficulty::Intermediate,
        tags: &["Arrays", "Logic", "2D Loops"],
    },
    GameDescriptor {
        id: GameKind::Snake,
        title: "Snake",
        description: "Eat apples, grow longer, don't hit the wall!",
        icon: "ghost",
        has_demo: false,
        difficulty: Difficulty::Intermediate,
        tags: &["Swing", "Graphics", "Events"],
    },
    GameDescriptor {
        id: GameKind::PingPong,
        title: "Ping Pong",
        description: "Classic arcade tennis game with paddles.",
        icon: "gamepad",
        has_demo: false,
        difficulty: Difficulty::Intermediate,
        tags: &["Swing", "Physics", "Animation"],
    },
    GameDescriptor {
        id: GameKind::Shooter2d,
        title: "2D Shooter",
        description: "Move a ship and shoot incoming enemies.",
        icon: "crosshair",
        has_demo: false,
        difficulty: Difficulty::Advanced,
        tags: &["Graphics", "Collision", "OOP"],
    },
    GameDescriptor {
        id: GameKind::Hangman,
        title: "Hangman",
        description: "Guess the hidden word letter by letter.",
        icon: "help",
        has_demo: false,
        difficulty: Difficulty::Beginner,
        tags: &["Strings", "Input", "Logic"],
    },
    GameDescriptor {
        id: GameKind::Quiz,
        title: "Quiz Game",
        description: "Multiple choice questions to test your knowledge.",
        icon: "brain",
        has_demo: false,
        difficulty: Difficulty::Beginner,
        tags: &["Objects", "Lists", "IO"],
    },
    GameDescriptor {
        id: GameKind::Maze,
        title: "Maze Runner",
        description: "Navigate through a generated maze to find the exit.",
        icon: "map",
        has_demo: false,
        difficulty: Difficulty::Advanced,
        tags: &["Algorithms", "2D Arrays", "Recursion"],
    },
];

/// All catalog entries in sidebar order.
pub fn list() -> &'static [GameDescriptor] {
    &CATALOG
}

/// Look up a descriptor, falling back to the first entry.
pub fn find(id: GameKind) -> &'static GameDescriptor {
    CATALOG.iter().find(|g| g.id == id).unwrap_or(&CATALOG[0])
}

/// Look up a descriptor by wire key. Unknown keys resolve to the first entry.
pub fn find_by_key(key: &str) -> &'static GameDescriptor {
    GameKind::from_key(key).map(find).unwrap_or(&CATALOG[0])
}

/// File name shown in the code panel header, e.g. `TicTacToe.java`.
pub fn source_file_name(title: &str) -> String {
    let mut name: String = title.split_whitespace().collect();
    name.push_str(".java");
    name
}

/// Hand-written sample for the demo game. Seeds every session's code cache.
pub const STATIC_NUMBER_GUESS_CODE: &str = r#"import java.util.Random;
import java.util.Scanner;

public class NumberGuess {
    public static void main(String[] args) {
        Scanner input = new Scanner(System.in);
        Random rand = new Random();

        int number = rand.nextInt(100) + 1; // 1-100
        int guess = 0;
        int attempts = 0;

        System.out.println("Welcome to the Number Guessing Game!");
        System.out.println("I picked a number between 1 and 100.");
        System.out.println("Try to guess it!");

        while (guess != number) {
            System.out.print("Enter your guess: ");
            guess = input.nextInt();
            attempts++;

            if (guess > number) {
                System.out.println("Too high! Try again.");
            }
            else if (guess < number) {
                System.out.println("Too low! Try again.");
            }
            else {
                System.out.println("Correct! You guessed it in " + attempts + " attempts.");
            }
        }

        input.close();
    }
}"#;
