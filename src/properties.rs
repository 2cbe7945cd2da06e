//! Bulk properties of the cloth, e.g. energy and strain. Useful for spotting instability: with the default
//! timestep and stiffness, total energy should only decay once the cloth settles.

use lin_alg::f32::Vec3;
#[cfg(feature = "plot")]
use plotters::{
    element::PathElement,
    prelude::{
        BitMapBackend, ChartBuilder, Color, IntoDrawingArea, RGBColor, BLACK, BLUE, GREEN, RED,
        WHITE,
    },
    series::LineSeries,
};

use crate::{cloth::Cloth, particle::Particle, spring::Spring};

pub fn kinetic_energy(particles: &[Particle]) -> f32 {
    particles
        .iter()
        .map(|p| 0.5 * p.mass * p.vel.dot(p.vel))
        .sum()
}

/// Gravitational potential energy, with zero at the floor.
pub fn potential_energy(particles: &[Particle], gravity: Vec3, floor_height: f32) -> f32 {
    let floor = Vec3::new(0., floor_height, 0.);
    particles
        .iter()
        .map(|p| -p.mass * gravity.dot(p.posit - floor))
        .sum()
}

/// Energy stored in stretched or compressed springs.
pub fn elastic_energy(springs: &[Spring], particles: &[Particle]) -> f32 {
    springs.iter().map(|s| s.energy(particles)).sum()
}

/// The largest relative deviation from rest length, over all springs.
pub fn max_strain(springs: &[Spring], particles: &[Particle]) -> f32 {
    springs
        .iter()
        .map(|s| s.strain(particles))
        .fold(0., f32::max)
}

pub fn lowest_point(particles: &[Particle]) -> f32 {
    particles
        .iter()
        .map(|p| p.posit.y)
        .fold(f32::INFINITY, f32::min)
}

#[derive(Clone, Copy, Debug)]
pub struct EnergySample {
    /// Simulated seconds.
    pub time: f32,
    pub kinetic: f32,
    pub potential: f32,
    pub elastic: f32,
    pub max_strain: f32,
}

impl EnergySample {
    pub fn measure(cloth: &Cloth) -> Self {
        let particles = cloth.particles();
        Self {
            time: cloth.time_elapsed(),
            kinetic: kinetic_energy(particles),
            potential: potential_energy(particles, cloth.gravity(), cloth.floor_height()),
            elastic: elastic_energy(cloth.springs(), particles),
            max_strain: max_strain(cloth.springs(), particles),
        }
    }

    pub fn total(&self) -> f32 {
        self.kinetic + self.potential + self.elastic
    }
}

/// Plot several series sharing an X axis to a PNG.
#[cfg(feature = "plot")]
pub fn plot(
    series: &[(&str, RGBColor, Vec<(f64, f64)>)],
    x_label: &str,
    y_label: &str,
    plot_title: &str,
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let pts = series.iter().flat_map(|(_, _, data)| data.iter());

    let mut x_range = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y_range = (f64::INFINITY, f64::NEG_INFINITY);
    for (x, y) in pts {
        x_range = (x_range.0.min(*x), x_range.1.max(*x));
        y_range = (y_range.0.min(*y), y_range.1.max(*y));
    }
    if !x_range.0.is_finite() || !y_range.0.is_finite() {
        return Ok(()); // No data.
    }
    // Flat series still need a non-empty range.
    if y_range.1 - y_range.0 < 1.0e-9 {
        y_range = (y_range.0 - 1., y_range.1 + 1.);
    }
    if x_range.1 - x_range.0 < 1.0e-9 {
        x_range.1 = x_range.0 + 1.;
    }

    let fname = format!("{filename}.png");
    let root = BitMapBackend::new(&fname, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(plot_title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;

    for (label, color, data) in series {
        let color = *color;
        chart
            .draw_series(LineSeries::new(data.iter().cloned(), color))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new([(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(feature = "plot")]
pub fn plot_energy(samples: &[EnergySample], desc: &str) -> Result<(), Box<dyn std::error::Error>> {
    let col = |f: fn(&EnergySample) -> f32| -> Vec<(f64, f64)> {
        samples
            .iter()
            .map(|s| (s.time as f64, f(s) as f64))
            .collect()
    };

    plot(
        &[
            ("Kinetic", RED, col(|s| s.kinetic)),
            ("Potential", BLUE, col(|s| s.potential)),
            ("Elastic", GREEN, col(|s| s.elastic)),
            ("Total", BLACK, col(|s| s.total())),
        ],
        "t (s)",
        "E (J)",
        &format!("Energy of {desc}"),
        &format!("energy_plot_{desc}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energies() {
        let mut particles = vec![
            Particle::new(0, Vec3::new(0., 1., 0.), 2., false),
            Particle::new(1, Vec3::new(1., 1., 0.), 2., false),
        ];
        let springs = vec![Spring::new(&particles, 0, 1, 8., 0.)];

        particles[0].vel = Vec3::new(3., 0., 4.);
        particles[1].posit = Vec3::new(1.5, 1., 0.);

        assert!((kinetic_energy(&particles) - 25.).abs() < 1e-4);
        // Two masses of 2, each 2 above the floor.
        let pe = potential_energy(&particles, Vec3::new(0., -10., 0.), -1.);
        assert!((pe - 80.).abs() < 1e-3);
        assert!((elastic_energy(&springs, &particles) - 1.).abs() < 1e-4);
        assert!((max_strain(&springs, &particles) - 0.5).abs() < 1e-5);
        assert_eq!(lowest_point(&particles), 1.);
    }

    #[test]
    fn resting_cloth_has_no_elastic_energy() {
        let cloth = Cloth::new(&Default::default()).unwrap();
        let sample = EnergySample::measure(&cloth);

        assert_eq!(sample.kinetic, 0.);
        assert!(sample.elastic < 1e-6);
        assert!(sample.max_strain < 1e-4);
        assert!(sample.potential > 0.);
        assert_eq!(sample.total(), sample.kinetic + sample.potential + sample.elastic);
    }
}
