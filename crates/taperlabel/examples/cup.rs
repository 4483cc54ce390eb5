//! Label for a paper cup: 90 mm tall, 80 mm rim, 56 mm base.

use taperlabel::{Label, LabelSpec, SvgStyle};

fn main() {
    // The cup is measured standing up, so convert from vertical height.
    let spec = LabelSpec::from_vertical_height(90.0, 180.0, 80.0, 56.0);
    let label = Label::new(spec).unwrap();

    let (width, height) = label.bounds();
    println!("{}: {:.1} x {:.1} mm", label.title(), width, height);

    label.write_svg("cup.svg", &SvgStyle::default()).unwrap();
    label.write_dxf("cup.dxf").unwrap();
    println!("wrote cup.svg and cup.dxf");
}
