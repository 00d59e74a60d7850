//! End-to-end scenarios driving the JSON contract: parse a scene, run the
//! simulation, serialize the response.

use radview::io::{parse_scene, response_json};
use radview::{Point, Polygon, Simulation, TraceScene, Vector};

fn run_json(json: &str) -> serde_json::Value {
    let scene = parse_scene(json).unwrap();
    let results = Simulation::new(&scene).run();
    let response = response_json(&results).unwrap();
    serde_json::from_str(&response).unwrap()
}

fn single_square_scene(normal: &str, extra: &str) -> String {
    format!(
        r#"{{
        "receiver_planes": {{
            "probe": {{
                "width": 1, "height": 1,
                "points": [{{"origin": [0, 0, 0], "normal": {normal}}}]
            }}
        }},
        "polygons": [
            {{"polygon": [[-10, -10, 1], [10, -10, 1], [10, 10, 1], [-10, 10, 1]],
              "temperature": 1000}}
        ]{extra},
        "num_rays": 200000,
        "seed": 42
    }}"#
    )
}

#[test]
fn single_facing_square() {
    // One large emitter right above the receiver: the analytic view factor
    // for a 20x20 square at distance 1 is ~0.9918, so T ~992.
    let response = run_json(&single_square_scene("[0, 0, 1]", ""));

    assert_eq!(response["success"], true);
    let plane = &response["planes"][0];
    assert_eq!(plane["name"], "probe");
    let t = plane["values"][0].as_f64().unwrap();
    assert!((t - 991.8).abs() < 5.0, "T = {t:.2}, expected ~991.8");
}

#[test]
fn fully_blocked_receiver() {
    // An oversized inert polygon halfway to the emitter blocks every path.
    let extra = r#",
        "inert_polygons": [
            [[-20, -20, 0.5], [20, -20, 0.5], [20, 20, 0.5], [-20, 20, 0.5]]
        ]"#;
    let response = run_json(&single_square_scene("[0, 0, 1]", extra));
    let t = response["planes"][0]["values"][0].as_f64().unwrap();
    assert_eq!(t, 0.0);
}

#[test]
fn back_facing_receiver() {
    let response = run_json(&single_square_scene("[0, 0, -1]", ""));
    let t = response["planes"][0]["values"][0].as_f64().unwrap();
    assert_eq!(t, 0.0);
}

#[test]
fn two_symmetric_emitters_average_their_temperatures() {
    let scene_with_temps = |t_left: f64, t_right: f64| {
        format!(
            r#"{{
            "receiver_planes": {{
                "probe": {{
                    "width": 1, "height": 1,
                    "points": [{{"origin": [0, 0, 0], "normal": [0, 0, 1]}}]
                }}
            }},
            "polygons": [
                {{"polygon": [[-3, -1, 1], [-1, -1, 1], [-1, 1, 1], [-3, 1, 1]],
                  "temperature": {t_left}}},
                {{"polygon": [[1, -1, 1], [3, -1, 1], [3, 1, 1], [1, 1, 1]],
                  "temperature": {t_right}}}
            ],
            "num_rays": 100000,
            "seed": 99
        }}"#
        )
    };

    // Same seed means identical rays, so the mixed-temperature run differs
    // from the uniform run only by (T_right - T_mean) * (VF2 - VF1).
    let mixed = run_json(&scene_with_temps(500.0, 1500.0));
    let uniform = run_json(&scene_with_temps(1000.0, 1000.0));

    let t_mixed = mixed["planes"][0]["values"][0].as_f64().unwrap();
    let t_uniform = uniform["planes"][0]["values"][0].as_f64().unwrap();

    assert!(t_uniform > 50.0, "emitters should be visible, T = {t_uniform:.2}");
    assert!(
        (t_mixed - t_uniform).abs() < 15.0,
        "symmetric emitters should average: mixed {t_mixed:.2} vs uniform {t_uniform:.2}"
    );
}

#[test]
fn seeded_runs_are_byte_identical() {
    let json = single_square_scene("[0, 0, 1]", "").replace("\"seed\": 42", "\"seed\": 123");

    let run = || {
        let scene = parse_scene(&json).unwrap();
        let results = Simulation::new(&scene).run();
        response_json(&results).unwrap()
    };
    assert_eq!(run(), run());
}

#[test]
fn grid_shape_and_point_order() {
    // 4x3 grid of 12 points; normals alternate up/down so the output
    // order is observable through the zero pattern.
    let mut points = Vec::new();
    for i in 0..12 {
        let normal = if i % 2 == 0 { "[0, 0, 1]" } else { "[0, 0, -1]" };
        points.push(format!(
            r#"{{"origin": [{}, 0, 0], "normal": {normal}}}"#,
            i as f64 * 0.1
        ));
    }
    let json = format!(
        r#"{{
        "receiver_planes": {{
            "grid": {{"width": 4, "height": 3, "points": [{}]}}
        }},
        "polygons": [
            {{"polygon": [[-10, -10, 1], [10, -10, 1], [10, 10, 1], [-10, 10, 1]],
              "temperature": 1000}}
        ],
        "num_rays": 2000,
        "seed": 5
    }}"#,
        points.join(",")
    );

    let response = run_json(&json);
    let plane = &response["planes"][0];
    assert_eq!(plane["width"], 4);
    assert_eq!(plane["height"], 3);
    let values = plane["values"].as_array().unwrap();
    assert_eq!(values.len(), 12);
    for (i, value) in values.iter().enumerate() {
        let t = value.as_f64().unwrap();
        if i % 2 == 0 {
            assert!(t > 900.0, "point {i} faces the emitter, T = {t:.2}");
        } else {
            assert_eq!(t, 0.0, "point {i} faces away");
        }
    }
}

#[test]
fn planes_are_processed_in_name_order() {
    let json = r#"{
        "receiver_planes": {
            "zeta": {"width": 1, "height": 1,
                     "points": [{"origin": [0, 0, 0], "normal": [0, 0, 1]}]},
            "alpha": {"width": 1, "height": 1,
                      "points": [{"origin": [0, 0, 0], "normal": [0, 0, -1]}]}
        },
        "polygons": [
            {"polygon": [[-10, -10, 1], [10, -10, 1], [10, 10, 1], [-10, 10, 1]],
             "temperature": 1000}
        ],
        "num_rays": 2000,
        "seed": 1
    }"#;
    let response = run_json(json);
    let planes = response["planes"].as_array().unwrap();
    assert_eq!(planes[0]["name"], "alpha");
    assert_eq!(planes[1]["name"], "zeta");
    // alpha's point faces away, zeta's faces the emitter
    assert_eq!(planes[0]["values"][0].as_f64().unwrap(), 0.0);
    assert!(planes[1]["values"][0].as_f64().unwrap() > 900.0);
}

#[test]
fn zero_rays_zero_temperatures() {
    let json = single_square_scene("[0, 0, 1]", "").replace("200000", "0");
    let response = run_json(&json);
    assert_eq!(response["planes"][0]["values"][0].as_f64().unwrap(), 0.0);
}

#[test]
fn monte_carlo_error_shrinks_with_ray_count() {
    use rand_pcg::Pcg32;

    // Doubling the ray count should shrink the standard deviation of a
    // view factor by about sqrt(2).
    let emitter = radview::Emitter {
        polygon: Polygon::new(vec![
            Point::new(-1., -1., 1.),
            Point::new(1., -1., 1.),
            Point::new(1., 1., 1.),
            Point::new(-1., 1., 1.),
        ]),
        temperature: 1.0,
    };
    let scene = TraceScene::new(&[emitter], &[]);
    let origin = Point::new(0., 0., 0.);
    let normal = Vector::new(0., 0., 1.);

    let std_dev = |num_rays: usize| {
        let reps = 200;
        let samples: Vec<f64> = (0..reps)
            .map(|i| {
                let mut rng = Pcg32::new(31, i as u64);
                scene.view_factors(origin, &normal, num_rays, &mut rng)[0]
            })
            .collect();
        let mean = samples.iter().sum::<f64>() / reps as f64;
        let var = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (reps - 1) as f64;
        var.sqrt()
    };

    let ratio = std_dev(1000) / std_dev(2000);
    assert!(
        (ratio - 2.0_f64.sqrt()).abs() < 0.45,
        "std ratio = {ratio:.3}, expected ~1.414"
    );
}
