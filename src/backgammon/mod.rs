mod board;
pub use board::Board;
pub use board::Point;
pub use board::CHECKERS_PER_PLAYER;

mod player;
pub use player::Player;

mod participant;
pub use participant::Participant;

mod position;
pub use position::Position;

mod outcome;
pub use outcome::GameOutcome;

mod game;
pub use game::Game;
pub use game::TurnPhase;

mod halfmove;
pub use halfmove::HalfMove;

mod full_move;
pub use full_move::Move;

mod dice;
pub use dice::Dice;
pub use dice::DieSource;
pub use dice::RandomDie;
pub use dice::ScriptedDie;

mod snapshot;
pub use snapshot::GameSnapshot;
