//! End-to-end tests for the parse → anneal → report pipeline.
//!
//! These run the whole search on small circuits where the optimum is known
//! by hand, then check the reported metrics against the placed rectangles.

use mosaic_conformance::{assert_disjoint, full_pipeline, make_params, three_block_circuit};
use mosaic_io::{render_svg, write_result};

#[test]
fn three_blocks_tile_the_outline() {
    let (blocks, nets) = three_block_circuit();
    let result = full_pipeline(blocks, nets, make_params(7));

    // The three blocks cover 64 units, exactly the 8x8 outline, so a
    // feasible placement is also a perfect tiling.
    assert!(result.plan.stats.fits, "stats: {:?}", result.plan.stats);
    assert_eq!(result.plan.stats.width, 8);
    assert_eq!(result.plan.stats.height, 8);
    assert_eq!(result.plan.stats.area, 64);
    assert_disjoint(&result.netlist);
}

#[test]
fn placed_rectangles_stay_inside_the_reported_extent() {
    let (blocks, nets) = three_block_circuit();
    let result = full_pipeline(blocks, nets, make_params(11));

    for block in result.netlist.blocks.values() {
        assert!(block.rect.x2 <= result.plan.stats.width);
        assert!(block.rect.y2 <= result.plan.stats.height);
        assert!(block.rect.x1 < block.rect.x2);
        assert!(block.rect.y1 < block.rect.y2);
    }
}

#[test]
fn terminal_only_net_has_fixed_wirelength() {
    let blocks = "\
Outline: 100 100
NumBlocks: 1
NumTerminals: 2
solo 5 5
p0 terminal 0 0
p1 terminal 10 10
";
    let nets = "\
NumNets: 1
NetDegree: 2
p0 p1
";
    let result = full_pipeline(blocks, nets, make_params(1));
    // Terminals never move, so the net's half-perimeter is the bounding
    // box of (0,0) and (10,10) regardless of where the block lands.
    assert_eq!(result.netlist.total_hpwl(), 20.0);
    assert_eq!(result.plan.stats.wirelength, 20.0);
}

#[test]
fn oversized_block_reports_infeasible() {
    let blocks = "\
Outline: 4 4
NumBlocks: 1
NumTerminals: 0
giant 10 10
";
    let nets = "NumNets: 0\n";
    let params = make_params(2);
    let restarts = params.max_restarts;
    let result = full_pipeline(blocks, nets, params);

    // No perturbation can shrink a block, so every restart is spent and
    // the result is still reported rather than treated as an error.
    assert!(!result.plan.stats.fits);
    assert_eq!(result.plan.stats.restarts, restarts);
    let giant = result.netlist.blocks.values().next().unwrap();
    assert_eq!(giant.rect.width().max(giant.rect.height()), 10);
}

#[test]
fn same_seed_gives_same_placement() {
    let (blocks, nets) = three_block_circuit();
    let a = full_pipeline(blocks, nets, make_params(99));
    let b = full_pipeline(blocks, nets, make_params(99));

    assert_eq!(a.plan.stats.cost, b.plan.stats.cost);
    assert_eq!(a.plan.stats.wirelength, b.plan.stats.wirelength);
    for (ra, rb) in a
        .netlist
        .blocks
        .values()
        .zip(b.netlist.blocks.values())
    {
        assert_eq!(ra.rect, rb.rect);
    }
}

#[test]
fn result_file_lists_every_block() {
    let (blocks, nets) = three_block_circuit();
    let result = full_pipeline(blocks, nets, make_params(5));

    let mut out = Vec::new();
    write_result(&mut out, &result.netlist, &result.plan.stats).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // Five header lines then one line per block.
    assert_eq!(lines.len(), 5 + result.netlist.block_count());
    assert_eq!(lines[2], result.plan.stats.area.to_string());
    assert_eq!(
        lines[3],
        format!("{} {}", result.plan.stats.width, result.plan.stats.height)
    );
    for name in ["alpha", "beta", "gamma"] {
        assert!(
            lines[5..].iter().any(|l| l.starts_with(name)),
            "missing block line for {name}"
        );
    }
}

#[test]
fn svg_render_draws_every_block() {
    let (blocks, nets) = three_block_circuit();
    let result = full_pipeline(blocks, nets, make_params(5));

    let svg = render_svg(&result.netlist, result.outline);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    for name in ["alpha", "beta", "gamma"] {
        assert!(svg.contains(name), "missing label for {name}");
    }
}
