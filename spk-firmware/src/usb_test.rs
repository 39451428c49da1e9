use super::*;

fn setup_packet(request_type: u8, request: u8, value: u16, index: u16, length: u16) -> Request {
    let v = value.to_le_bytes();
    let i = index.to_le_bytes();
    let l = length.to_le_bytes();
    Request::parse(&[request_type, request, v[0], v[1], i[0], i[1], l[0], l[1]])
}

fn control() -> Control<'static> {
    Control::new(InterfaceNumber(0), &SHARED_REPORT_DESC)
}

#[test]
fn descriptors() {
    let mut c = control();
    let mut buf = [0; 64];

    let req = setup_packet(0x81, Request::GET_DESCRIPTOR, 0x2200, 0, 132);
    match c.control_in(req, &mut buf) {
        Some(InResponse::Accepted(desc)) => assert_eq!(desc, &SHARED_REPORT_DESC),
        _ => panic!("report descriptor rejected"),
    }

    let req = setup_packet(0x81, Request::GET_DESCRIPTOR, 0x2100, 0, 9);
    match c.control_in(req, &mut buf) {
        Some(InResponse::Accepted(desc)) => {
            assert_eq!(desc.len(), 9);
            assert_eq!(desc[7], 132);
            assert_eq!(desc[8], 0);
        }
        _ => panic!("hid descriptor rejected"),
    }
}

#[test]
fn other_interface_is_ignored() {
    let mut c = control();
    let mut buf = [0; 8];
    let req = setup_packet(0x81, Request::GET_DESCRIPTOR, 0x2200, 1, 132);
    assert!(c.control_in(req, &mut buf).is_none());

    let req = setup_packet(0x21, HID_REQ_SET_IDLE, 0, 1, 0);
    assert!(c.control_out(req, &[]).is_none());
}

#[test]
fn idle() {
    let mut c = control();
    let mut buf = [0; 8];

    let req = setup_packet(0x21, HID_REQ_SET_IDLE, 0x0400, 0, 0);
    assert!(matches!(c.control_out(req, &[]), Some(OutResponse::Accepted)));

    let req = setup_packet(0xa1, HID_REQ_GET_IDLE, 0, 0, 1);
    match c.control_in(req, &mut buf) {
        Some(InResponse::Accepted(data)) => assert_eq!(data, &[4]),
        _ => panic!("get idle rejected"),
    }
}

#[test]
fn output_reports_and_protocol() {
    let mut c = control();

    let req = setup_packet(0x21, HID_REQ_SET_REPORT, 0x0206, 0, 2);
    assert!(matches!(
        c.control_out(req, &[6, 2]),
        Some(OutResponse::Accepted)
    ));

    let req = setup_packet(0x21, HID_REQ_SET_PROTOCOL, 1, 0, 0);
    assert!(matches!(c.control_out(req, &[]), Some(OutResponse::Accepted)));

    let req = setup_packet(0x21, HID_REQ_SET_PROTOCOL, 0, 0, 0);
    assert!(matches!(c.control_out(req, &[]), Some(OutResponse::Rejected)));
}

#[test]
fn report_size_fits_descriptor() {
    assert_eq!(MAX_REPORT_SIZE, 34);
    assert_eq!(SHARED_REPORT_DESC.len(), 132);
}
