use island_core::{Fractal2D, NoiseParameters, normalize2};

fn main() -> island_core::Result<()> {
    // Raw 32×16 elevation field, seed 2025
    let noise = Fractal2D::new(NoiseParameters {
        seed: 2025,
        octaves: 6,
        scale: 12.0,
        ..NoiseParameters::default()
    })?;
    let mut field = noise.generate(false, 32, 16)?;
    normalize2(&mut field);

    // Print it as a coarse shaded map, highest y first
    const SHADES: &[u8] = b" .:-=+*#%@";
    for y in (0..field.height()).rev() {
        let line: String = (0..field.width())
            .map(|x| {
                let i = (*field.get(x, y) * (SHADES.len() - 1) as f32).round() as usize;
                SHADES[i] as char
            })
            .collect();
        println!("{line}");
    }
    Ok(())
}
