use lib::prelude::*;

lib::entry! {
    input = "d03.txt",
    expect = (4361, 467835);

    fn solve(mut input: IStr<'_>) -> Result<(u64, u64)> {
        let schematic = input.next::<Schematic>()?;
        Ok((schematic.part_sum()?, schematic.gear_sum()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{solve, IStr};

    #[test]
    fn example() {
        let input = include_bytes!("../../inputs/d03.txt");
        assert_eq!(solve(IStr::new(input)).unwrap(), (4361, 467835));
    }

    #[test]
    fn bad_character() {
        let error = solve(IStr::new(b"1.\n.a\n")).unwrap_err();
        assert_eq!(
            format!("{error:#}"),
            "bad grid: unexpected byte `a` at line 2, column 2"
        );
    }
}
