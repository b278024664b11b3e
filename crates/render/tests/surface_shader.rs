use std::fs;
use std::path::Path;

fn parse_and_validate(path: &Path) -> naga::Module {
    let src = fs::read_to_string(path).expect("read shader");
    let module = naga::front::wgsl::parse_str(&src).expect("wgsl parse");
    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    validator.validate(&module).expect("wgsl validate");
    module
}

#[test]
fn compile_surface_shader() {
    let shader = Path::new(env!("CARGO_MANIFEST_DIR")).join("src/surface.wgsl");
    let module = parse_and_validate(&shader);

    let names: Vec<&str> = module.entry_points.iter().map(|e| e.name.as_str()).collect();
    println!("entry points: {names:?}");
    for expected in ["vs_world", "vs_screen", "fs_main"] {
        assert!(names.contains(&expected), "missing entry point {expected}");
    }
}
