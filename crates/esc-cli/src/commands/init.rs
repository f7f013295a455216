use std::fs;
use std::path::Path;

const SAMPLE_LEVEL: &str = "\
2

ROOM
Study
Dust hangs in the lamplight. The door behind you has clicked shut.
OBJECTS 3

OBJECT
Desk
A heavy oak desk with a combination drawer.
1
The drawer dial wants a year. The calendar on the wall is stuck at the year the house was built: 1887.
1887
1
Brass Key

OBJECT
Bookshelf
One book is bound in red leather.
2
The spine reads: \"What has hands but cannot clap?\"
clock
0
NOITEM

OBJECT
Armchair
Something glints between the cushions.
0
NOPROMPT
NOANSWER
YES
Torn Note

ROOM
Hallway
A narrow hallway ends in a locked door.
OBJECTS 1

OBJECT
Front Door
Solid wood with an old brass lock.
0
NOPROMPT
NOANSWER
0
NOITEM
";

pub fn run(name: &str) -> Result<(), String> {
    let dir = Path::new(name);

    if dir.exists() {
        return Err(format!("directory '{}' already exists", name));
    }

    fs::create_dir_all(dir).map_err(|e| format!("cannot create directory: {e}"))?;
    fs::write(dir.join("rooms.txt"), SAMPLE_LEVEL)
        .map_err(|e| format!("cannot write rooms.txt: {e}"))?;

    println!("Created escape room '{}' in {}/", name, name);
    println!("  rooms.txt  level definition with two sample rooms");
    println!();
    println!("Get started:");
    println!("  cd {}", name);
    println!("  escape check   # Parse rooms.txt and report problems");
    println!("  escape show    # List rooms and objects");
    println!("  escape play    # Start a game");

    Ok(())
}
