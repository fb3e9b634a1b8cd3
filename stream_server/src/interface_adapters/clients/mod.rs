pub mod gamelift;
