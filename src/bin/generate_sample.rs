use std::path::Path;

use anyhow::{Context, Result};

const HEADER: [&str; 6] = ["floor1", "floor2", "floor3", "floor4", "temperature", "area"];

/// Seed for both files. Fixed so that regenerating the sample data gives
/// byte-identical CSVs, which keeps the printed metrics comparable between runs.
const SEED: u64 = 42;

/// xoshiro256** over a splitmix64-expanded seed. Only the draws the mock
/// sensor rows need are exposed.
struct SensorRng {
    s: [u64; 4],
}

impl SensorRng {
    fn seeded(seed: u64) -> Self {
        let mut z = seed;
        let mut next = || {
            z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut x = z;
            x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            x ^ (x >> 31)
        };
        SensorRng {
            s: [next(), next(), next(), next()],
        }
    }

    fn next_u64(&mut self) -> u64 {
        let [a, b, c, d] = &mut self.s;
        let out = b.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *b << 17;
        *c ^= *a;
        *d ^= *b;
        *b ^= *c;
        *a ^= *d;
        *c ^= t;
        *d = d.rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)` from the top 53 bits.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * f64::EPSILON / 2.0
    }

    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.unit()
    }

    /// Whole-number sensor reading in `[lo, hi]`.
    fn reading(&mut self, lo: f64, hi: f64) -> f64 {
        self.uniform(lo, hi).round()
    }

    /// Standard normal noise (Box-Muller, cosine branch).
    fn noise(&mut self, std_dev: f64) -> f64 {
        let u1 = self.unit().max(f64::MIN_POSITIVE);
        let u2 = self.unit();
        std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// One sensor row; `area` follows a noisy linear law of the readings.
fn generate_row(rng: &mut SensorRng) -> [f64; 6] {
    let floor1 = rng.reading(0.0, 250.0);
    let floor2 = rng.reading(0.0, 300.0);
    let floor3 = rng.reading(0.0, 300.0);
    let floor4 = rng.reading(0.0, 40.0);
    let temperature = rng.reading(10.0, 35.0);

    let area = 0.02 * floor1 + 0.015 * floor2 + 0.01 * floor3 + 0.25 * floor4
        + 0.1 * temperature
        + rng.noise(1.0);
    [floor1, floor2, floor3, floor4, temperature, (area.max(0.0) * 100.0).round() / 100.0]
}

fn write_rows(path: &Path, rows: &[[f64; 6]]) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row.map(|v| v.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SensorRng::seeded(SEED);

    // Training rows include sensor glitches: zero areas and implausibly large ones.
    let mut train: Vec<[f64; 6]> = (0..1000).map(|_| generate_row(&mut rng)).collect();
    let mut glitches = 0;
    for row in train.iter_mut() {
        let roll = rng.unit();
        if roll < 0.03 {
            row[5] = 0.0;
            glitches += 1;
        } else if roll < 0.06 {
            row[5] = rng.reading(151.0, 900.0);
            glitches += 1;
        }
    }

    let test: Vec<[f64; 6]> = (0..200).map(|_| generate_row(&mut rng)).collect();

    let train_path = Path::new("data/MOCK_DATA-train.csv");
    let test_path = Path::new("data/MOCK_DATA-test.csv");
    write_rows(train_path, &train)?;
    write_rows(test_path, &test)?;

    println!(
        "Wrote {} training rows ({glitches} out of range) to {} and {} test rows to {}",
        train.len(),
        train_path.display(),
        test.len(),
        test_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_gives_same_rows() {
        let mut a = SensorRng::seeded(SEED);
        let mut b = SensorRng::seeded(SEED);
        for _ in 0..50 {
            assert_eq!(generate_row(&mut a), generate_row(&mut b));
        }
    }

    #[test]
    fn readings_stay_in_range() {
        let mut rng = SensorRng::seeded(7);
        for _ in 0..500 {
            let row = generate_row(&mut rng);
            assert!((0.0..=250.0).contains(&row[0]));
            assert!((0.0..=40.0).contains(&row[3]));
            assert!((10.0..=35.0).contains(&row[4]));
            assert!(row[5] >= 0.0);
            assert_eq!(row[0], row[0].round());
        }
    }

    #[test]
    fn written_file_has_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/train.csv");
        let mut rng = SensorRng::seeded(SEED);
        let rows: Vec<[f64; 6]> = (0..3).map(|_| generate_row(&mut rng)).collect();

        write_rows(&path, &rows).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("floor1,floor2,floor3,floor4,temperature,area"));
        assert_eq!(lines.count(), 3);
    }
}
