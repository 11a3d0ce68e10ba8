use lib::prelude::*;

lib::entry! {
    input = "d01.txt",
    expect = (142, 142);

    fn solve(mut input: IStr<'_>) -> Result<(u32, u32)> {
        let mut o1 = 0;
        let mut o2 = 0;

        while let Some(line) = input.try_line::<ArrayString<128>>()? {
            let (p1, p2) = calibration(&line);
            o1 += p1;
            o2 += p2;
        }

        Ok((o1, o2))
    }
}

/// Calibration values of a line, first only counting digits and then also
/// counting digits which are spelled out.
fn calibration(line: &str) -> (u32, u32) {
    let mut digits = FirstLast::default();
    let mut words = FirstLast::default();

    for (i, c) in line.char_indices() {
        if let Some(d) = c.to_digit(10) {
            digits.push(d);
            words.push(d);
            continue;
        }

        // Words may overlap, like `eightwo`, so every index is tried.
        let d = match line.as_bytes().get(i..).unwrap_or_default() {
            [b'o', b'n', b'e', ..] => 1,
            [b't', b'w', b'o', ..] => 2,
            [b't', b'h', b'r', b'e', b'e', ..] => 3,
            [b'f', b'o', b'u', b'r', ..] => 4,
            [b'f', b'i', b'v', b'e', ..] => 5,
            [b's', b'i', b'x', ..] => 6,
            [b's', b'e', b'v', b'e', b'n', ..] => 7,
            [b'e', b'i', b'g', b'h', b't', ..] => 8,
            [b'n', b'i', b'n', b'e', ..] => 9,
            _ => continue,
        };

        words.push(d);
    }

    (digits.value(), words.value())
}

#[derive(Default)]
struct FirstLast {
    first: Option<u32>,
    last: u32,
}

impl FirstLast {
    fn push(&mut self, d: u32) {
        self.first.get_or_insert(d);
        self.last = d;
    }

    fn value(&self) -> u32 {
        self.first.map_or(0, |first| first * 10 + self.last)
    }
}
