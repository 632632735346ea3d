use super::*;

#[test]
fn compose_maps_palette_and_key_alpha() {
    let mut ctx = RasterContext::new();
    ctx.set_palette_entry(0, 0, 0, 0);
    ctx.set_palette_entry(2, 15, 1, 0);
    ctx.set_pixel(10, 20, 2);
    ctx.set_key_color(0);

    let frame = ctx.compose_frame();
    assert_eq!(frame.width, 300);
    assert_eq!(frame.height, 216);
    assert_eq!(frame.data.len(), 300 * 216 * 4);
    assert_eq!(frame.pixel(10, 20), [255, 17, 0, 255]);
    assert_eq!(frame.pixel(11, 20), [0, 0, 0, 0]);
}

#[test]
fn compose_without_key_is_opaque() {
    let ctx = RasterContext::new();
    let frame = ctx.compose_frame();
    assert!(frame.data.chunks(4).all(|px| px[3] == 0xff));
}

#[test]
fn compose_honors_fine_offsets_toroidally() {
    let mut ctx = RasterContext::new();
    ctx.set_palette_entry(1, 15, 15, 15);
    ctx.set_pixel(0, 0, 1);
    ctx.set_pixel(WIDTH - 1, HEIGHT - 1, 1);
    ctx.set_offsets(3, 7);

    let frame = ctx.compose_frame();
    // display (x, y) samples ((x - 3) mod W, (y - 7) mod H)
    assert_eq!(frame.pixel(3, 7), [255, 255, 255, 255]);
    assert_eq!(frame.pixel(2, 6), [255, 255, 255, 255]);
    assert_eq!(frame.pixel(0, 0), [0, 0, 0, 255]);
}

#[test]
#[should_panic]
fn compose_into_rejects_wrong_size() {
    let ctx = RasterContext::new();
    let mut buf = vec![0u8; 16];
    ctx.compose_into(&mut buf);
}
