use lib::input::ErrorKind;
use lib::prelude::*;

/// Cubes in the bag.
const LIMITS: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

lib::entry! {
    input = "d02.txt",
    expect = (8, 2286);

    fn solve(mut input: IStr<'_>) -> Result<(u32, u32)> {
        let mut o1 = 0;
        let mut o2 = 0;

        while let Some(game) = input.try_line::<Game>()? {
            if game.min.within(&LIMITS) {
                o1 += game.id;
            }

            o2 += game.min.power();
        }

        Ok((o1, o2))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u32,
    green: u32,
    blue: u32,
}

impl Cubes {
    fn within(&self, limits: &Cubes) -> bool {
        self.red <= limits.red && self.green <= limits.green && self.blue <= limits.blue
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

/// A game along with the fewest cubes it could have been played with.
#[derive(Debug, PartialEq, Eq)]
struct Game {
    id: u32,
    min: Cubes,
}

lib::from_input! {
    |line: &str| -> Game {
        let (game, rest) = line
            .split_once(": ")
            .ok_or(ErrorKind::Expected("`Game <id>: `"))?;

        let id = game
            .strip_prefix("Game ")
            .ok_or(ErrorKind::Expected("`Game <id>`"))?
            .parse::<u32>()?;

        let mut min = Cubes::default();

        for pull in rest.split(|c: char| matches!(c, ';' | ',')) {
            let (count, color) = pull
                .trim()
                .split_once(' ')
                .ok_or(ErrorKind::Expected("`<count> <color>`"))?;

            let count = count.parse::<u32>()?;

            let c = match color {
                "red" => &mut min.red,
                "green" => &mut min.green,
                "blue" => &mut min.blue,
                _ => continue,
            };

            *c = (*c).max(count);
        }

        Ok(Game { id, min })
    }
}

#[cfg(test)]
mod tests {
    use super::{Cubes, ErrorKind, Game, IStr, LIMITS};

    #[test]
    fn parse_game() {
        let mut input = IStr::new(b"Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red");
        let game = input.next::<Game>().unwrap();

        assert_eq!(
            game,
            Game {
                id: 3,
                min: Cubes {
                    red: 20,
                    green: 13,
                    blue: 6
                }
            }
        );

        assert!(!game.min.within(&LIMITS));
        assert_eq!(game.min.power(), 1560);
    }

    #[test]
    fn unknown_colors_are_ignored() {
        let mut input = IStr::new(b"Game 7: 2 purple, 1 red");
        let game = input.next::<Game>().unwrap();
        assert_eq!(game.min, Cubes { red: 1, green: 0, blue: 0 });
    }

    #[test]
    fn malformed() {
        let mut input = IStr::new(b"Game 1 3 blue\n");
        let error = input.line::<Game>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::Expected(..)));

        let mut input = IStr::new(b"Game x: 3 blue\n");
        let error = input.line::<Game>().unwrap_err();
        assert!(matches!(error.kind(), ErrorKind::NotInteger(..)));
    }
}
