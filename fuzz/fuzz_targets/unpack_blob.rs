use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            // Decoding must never panic, whatever the input.
            if let Ok(set) = minset::unpack(data) {
                // Anything that decodes must survive a round trip.
                let repacked = minset::pack(&set);
                assert_eq!(minset::unpack(&repacked).unwrap(), set);
            }
        });
    }
}
