/// formats `value` with a `,` between every group of three digits
pub fn comma(value: u64) -> String {
    let digits = value.to_string();

    // leading group holds 1..=3 digits, every following group exactly 3
    let lead = match digits.len() % 3 {
        0 => 3,
        n => n,
    };

    let mut o = String::with_capacity(digits.len() + digits.len() / 3);
    o.push_str(&digits[..lead]);
    for (i, c) in digits[lead..].chars().enumerate() {
        if i % 3 == 0 {
            o.push(',');
        }
        o.push(c);
    }
    o
}
