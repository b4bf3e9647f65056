//! Testes de integração: transmissor e coletor em loopback

use std::net::SocketAddr;
use std::time::Duration;
use lux_core::prelude::*;
use lux_network::*;

fn collector() -> Collector {
    Collector::bind(SocketAddr::from(([127, 0, 0, 1], 0)), Duration::from_millis(500)).unwrap()
}

#[test]
fn test_transmit_and_collect() {
    let mut collector = collector();
    let dest = collector.local_addr().unwrap();
    let mut tx = UdpTransmitter::new(dest, DEFAULT_WRITE_TIMEOUT).unwrap();

    let pct = LuminosityPercentage::new(42).unwrap();
    let sent = tx.transmit(&encode_percentage(pct)).unwrap();
    assert_eq!(sent, 2);

    let reading = collector.recv_reading().unwrap().expect("datagram should arrive on loopback");
    assert_eq!(reading.value, pct);
    assert_eq!(reading.id, DEFAULT_SENSOR_ID);
    assert_eq!(reading.unit, "%");
    assert_eq!(reading.peer.port(), tx.local_addr().unwrap().port());
    assert_eq!(collector.received(), 1);
}

#[test]
fn test_collector_survives_malformed_datagram() {
    let mut collector = collector().with_sensor_id("bench-ldr");
    let dest = collector.local_addr().unwrap();
    let mut tx = UdpTransmitter::new(dest, DEFAULT_WRITE_TIMEOUT).unwrap();

    tx.transmit(b"ola").unwrap();
    tx.transmit(b"88").unwrap();

    assert!(matches!(collector.recv_reading(), Err(NetworkError::Malformed(_))));
    let reading = collector.recv_reading().unwrap().unwrap();
    assert_eq!(reading.value.value(), 88);
    assert_eq!(reading.id, "bench-ldr");
    assert_eq!(collector.rejected(), 1);
}

#[test]
fn test_collected_readings_feed_history_and_csv() {
    let dir = tempfile::tempdir().unwrap();
    let log = CsvLog::new(dir.path().join("log.csv"));
    let mut history = History::new(2);

    let mut collector = collector();
    let mut tx = UdpTransmitter::new(collector.local_addr().unwrap(), DEFAULT_WRITE_TIMEOUT).unwrap();

    for v in [10u8, 20, 30] {
        tx.transmit(&encode_percentage(LuminosityPercentage::new(v).unwrap())).unwrap();
        let reading = collector.recv_reading().unwrap().unwrap();
        log.append(&reading).unwrap();
        history.push(reading);
    }

    assert_eq!(history.values(), vec![20, 30]);
    let csv = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(csv.lines().count(), 4);
}
