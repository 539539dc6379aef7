// src/plot.rs - sampled-trajectory export for gnuplot

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::profile::MotionState;

/// Write samples as whitespace-delimited columns:
/// `t acc vel pos` or, with `include_jerk`, `t acc vel pos jerk`.
pub fn write_data_file(
    path: &Path,
    samples: &[MotionState],
    include_jerk: bool,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for s in samples {
        if include_jerk {
            writeln!(
                out,
                "{:.6} {:.6} {:.6} {:.6} {:.6}",
                s.time, s.acceleration, s.velocity, s.position, s.jerk
            )?;
        } else {
            writeln!(
                out,
                "{:.6} {:.6} {:.6} {:.6}",
                s.time, s.acceleration, s.velocity, s.position
            )?;
        }
    }
    out.flush()
}

/// Write a gnuplot multiplot script rendering the data file to a PNG.
pub fn write_gnuplot_script(
    path: &Path,
    data_path: &Path,
    image_name: &str,
    include_jerk: bool,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    let data = data_path.display();
    let rows = if include_jerk { 4 } else { 3 };

    writeln!(out, "set terminal png")?;
    writeln!(out, "set output '{image_name}'")?;
    writeln!(out, "set grid")?;
    writeln!(out, "set multiplot layout {rows},1")?;
    writeln!(out, "plot '{data}' using 1:2 with lines title 'acc[m/s^2]'")?;
    writeln!(out, "plot '{data}' using 1:3 with lines title 'vel[m/s]'")?;
    writeln!(out, "plot '{data}' using 1:4 with lines title 'pos[m]'")?;
    if include_jerk {
        writeln!(out, "plot '{data}' using 1:5 with lines title 'jerk[m/s^3]'")?;
    }
    writeln!(out, "unset multiplot")?;
    out.flush()
}
