use super::*;

#[test]
fn ramp_test() {
    let accel = MouseAccel::normal();

    let mut v = accel.floor;
    assert_eq!(v, 3.0);
    v = accel.next(v, true);
    assert_eq!(v, 3.5);
    v = accel.next(v, true);
    assert_eq!(v, 4.0);

    for _ in 0..100 {
        v = accel.next(v, true);
        assert!(v <= accel.ceiling);
    }
    assert_eq!(v, 20.0);

    v = accel.next(v, false);
    assert_eq!(v, 3.0);
}

#[test]
fn scale_test() {
    assert_eq!(MouseAccel::scale(-1, 3.0), -3);
    assert_eq!(MouseAccel::scale(-1, 3.5), -3);
    assert_eq!(MouseAccel::scale(1, 3.5), 3);
    assert_eq!(MouseAccel::scale(1, 4.0), 4);
    assert_eq!(MouseAccel::scale(0, 20.0), 0);
    assert_eq!(MouseAccel::scale(1, 300.0), 127);
    assert_eq!(MouseAccel::scale(-1, 300.0), -127);
}

#[test]
fn profiles() {
    assert_eq!(MouseAccel::default(), MouseAccel::normal());
    for p in [MouseAccel::slow(), MouseAccel::normal(), MouseAccel::fast()] {
        assert!(p.floor <= p.ceiling);
        assert!(p.step > 0.0);
    }
}
