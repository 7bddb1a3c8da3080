use anyhow::{Context, Result};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// (channel, mean spend, typical CAC)
const CHANNELS: [(&str, f64, f64); 4] = [
    ("Email Marketing", 12_000.0, 350.0),
    ("Online Ads", 22_000.0, 600.0),
    ("Social Media", 18_000.0, 450.0),
    ("Referral", 8_000.0, 250.0),
];

const ROWS: usize = 500;

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let output_path = "customer_acquisition_cost_dataset.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Customer_ID", "Marketing_Channel", "Marketing_Spend", "New_Customers"])?;

    for i in 0..ROWS {
        let pick = (rng.next_u64() % CHANNELS.len() as u64) as usize;
        let (channel, mean_spend, cac) = CHANNELS[pick];
        let spend = rng.gauss(mean_spend, mean_spend * 0.3).max(500.0);
        // Noisy efficiency; occasionally a campaign converts nobody.
        let customers = (spend / rng.gauss(cac, cac * 0.4).max(1.0)).floor().max(0.0) as u64;

        writer.write_record([
            format!("CUST{:04}", i + 1),
            channel.to_string(),
            format!("{spend:.2}"),
            customers.to_string(),
        ])?;
    }
    writer.flush().context("flushing sample CSV")?;

    println!("Wrote {ROWS} campaign rows to {output_path}");
    Ok(())
}
