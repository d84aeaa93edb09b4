fn main() {
    let n: findec::Number = "0.25".parse().unwrap();
    let f = n.to_f64();
    println!("{:.20} bits={:x}", f, f.to_bits());
    println!("{:.20} bits={:x}", 0.25f64, 0.25f64.to_bits());
}
